//! TCP transport: the connection acceptor and per-connection sessions.
//!
//! The acceptor binds the configured port and spawns one [`Session`] task per
//! accepted connection. Sessions frame inbound bytes into delimited lines,
//! sanitize them, dispatch them against the shared message log, and queue
//! the responses for writing.

mod acceptor;
mod codec;
mod errors;
mod sanitize;
mod session;
#[cfg(test)]
mod test_utils;

use std::fmt;
use std::sync::Arc;

use msglog_config::RequestDelimiter;

use crate::dispatch::RequestDispatcher;
use crate::message_log::MessageLog;

pub use self::acceptor::ConnectionAcceptor;
pub(crate) use self::codec::DelimitedLineCodec;
pub use self::errors::{FramingError, ListenerError};
pub(crate) use self::sanitize::sanitize_line;
pub(crate) use self::session::Session;
#[cfg(test)]
pub(crate) use self::test_utils::CountingDispatcher;

const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// State every session shares: the log, the dispatcher, and framing
/// settings.
#[derive(Clone)]
pub struct ServiceContext {
    log: Arc<MessageLog>,
    dispatcher: Arc<dyn RequestDispatcher>,
    delimiter: RequestDelimiter,
    max_line_bytes: usize,
}

impl ServiceContext {
    /// Bundles the shared collaborators for sessions.
    #[must_use]
    pub fn new(
        log: Arc<MessageLog>,
        dispatcher: Arc<dyn RequestDispatcher>,
        delimiter: RequestDelimiter,
        max_line_bytes: usize,
    ) -> Self {
        Self {
            log,
            dispatcher,
            delimiter,
            max_line_bytes,
        }
    }

    /// Shared message log.
    #[must_use]
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Dispatcher used to parse lines.
    #[must_use]
    pub fn dispatcher(&self) -> &dyn RequestDispatcher {
        self.dispatcher.as_ref()
    }

    /// Line delimiter and response terminator.
    #[must_use]
    pub const fn delimiter(&self) -> RequestDelimiter {
        self.delimiter
    }

    /// Largest undelimited line a session accepts.
    #[must_use]
    pub const fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("delimiter", &self.delimiter)
            .field("max_line_bytes", &self.max_line_bytes)
            .finish_non_exhaustive()
    }
}
