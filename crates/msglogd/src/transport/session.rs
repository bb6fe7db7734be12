//! Per-connection read, dispatch and write loop.
//!
//! A session cycles through three states: it waits for one delimited line
//! (reading), sanitizes and dispatches it (processing), then queues the
//! response for the writer task (writing) and goes straight back to reading.
//! Responses are fire-and-forget: the next read does not wait for the
//! previous write to flush. The session ends when the peer disconnects or a
//! read fails; a failed write is logged and leaves the reading side running.
//!
//! The reader task owns the session. The writer task owns the write half and
//! exits once the reader drops its sender and the queue drains, so the
//! connection is released exactly when no operation remains in flight.

use std::fmt;

use bytes::Bytes;
use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, WriteHalf};
use tokio::sync::mpsc;
use tokio_util::codec::FramedRead;
use tracing::{debug, trace, warn};

use crate::dispatch::ResponseBuffer;

use super::codec::DelimitedLineCodec;
use super::sanitize::sanitize_line;
use super::{ServiceContext, TRANSPORT_TARGET};

/// One client connection.
pub(crate) struct Session<S> {
    peer: String,
    stream: S,
    context: ServiceContext,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    pub(crate) fn new(peer: impl fmt::Display, stream: S, context: ServiceContext) -> Self {
        Self {
            peer: peer.to_string(),
            stream,
            context,
        }
    }

    /// Runs the session until the peer goes away or framing fails.
    pub(crate) async fn run(self) {
        let Self {
            peer,
            stream,
            context,
        } = self;
        debug!(target: TRANSPORT_TARGET, %peer, "session opened");

        let (reader, writer) = tokio::io::split(stream);
        let (responses, queue) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_responses(writer, queue, peer.clone()));

        let codec = DelimitedLineCodec::new(
            context.delimiter().as_bytes(),
            context.max_line_bytes(),
        );
        let mut lines = FramedRead::new(reader, codec);

        loop {
            let frame = match lines.next().await {
                Some(Ok(frame)) => frame,
                Some(Err(error)) => {
                    warn!(target: TRANSPORT_TARGET, %peer, %error, "session read failed");
                    break;
                }
                None => {
                    debug!(target: TRANSPORT_TARGET, %peer, "peer closed connection");
                    break;
                }
            };

            let Some(response) = process_line(&context, &frame) else {
                continue;
            };
            if responses.send(response).is_err() {
                trace!(target: TRANSPORT_TARGET, %peer, "writer stopped; response dropped");
            }
        }

        drop(responses);
        if let Err(error) = writer_task.await {
            warn!(target: TRANSPORT_TARGET, %peer, %error, "session writer task failed");
        }
        debug!(target: TRANSPORT_TARGET, %peer, "session closed");
    }
}

/// Sanitizes and dispatches one framed line.
///
/// Returns `None` when the line sanitizes to nothing; such lines never reach
/// the dispatcher and get no response.
pub(crate) fn process_line(context: &ServiceContext, frame: &[u8]) -> Option<Bytes> {
    let line = sanitize_line(frame);
    if line.is_empty() {
        trace!(target: TRANSPORT_TARGET, raw_len = frame.len(), "skipping empty line");
        return None;
    }

    let (code, request) = context.dispatcher().parse(&line);
    debug!(
        target: TRANSPORT_TARGET,
        line = %line,
        result = %code,
        request = ?request,
        "dispatching request"
    );

    let mut response = ResponseBuffer::new(context.delimiter());
    response.write_status(code);
    if let Some(request) = request {
        request.serve(context.log(), &mut response);
    }
    Some(response.into_bytes())
}

async fn write_responses<W>(
    mut writer: WriteHalf<W>,
    mut queue: mpsc::UnboundedReceiver<Bytes>,
    peer: String,
) where
    W: AsyncWrite,
{
    while let Some(response) = queue.recv().await {
        if let Err(error) = writer.write_all(&response).await {
            warn!(target: TRANSPORT_TARGET, %peer, %error, "session write failed");
            return;
        }
    }
    if let Err(error) = writer.shutdown().await {
        trace!(target: TRANSPORT_TARGET, %peer, %error, "session shutdown failed");
    }
}
