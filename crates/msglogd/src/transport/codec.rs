//! Delimiter framing for inbound request lines.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use super::FramingError;

/// Splits a byte stream into lines terminated by a fixed delimiter.
///
/// Yielded frames exclude the delimiter. Only bytes received since the last
/// scan are searched again, so a slowly arriving line costs linear time. A
/// line whose content exceeds `max_length` bytes is a framing error.
#[derive(Debug, Clone)]
pub struct DelimitedLineCodec {
    delimiter: &'static [u8],
    max_length: usize,
    next_index: usize,
}

impl DelimitedLineCodec {
    /// Creates a codec for `delimiter`, which must not be empty.
    #[must_use]
    pub const fn new(delimiter: &'static [u8], max_length: usize) -> Self {
        Self {
            delimiter,
            max_length,
            next_index: 0,
        }
    }

    fn find_delimiter(&self, buf: &[u8]) -> Option<usize> {
        // Step back far enough to catch a delimiter split across reads.
        let start = self
            .next_index
            .saturating_sub(self.delimiter.len().saturating_sub(1));
        buf.get(start..)?
            .windows(self.delimiter.len())
            .position(|window| window == self.delimiter)
            .map(|offset| start + offset)
    }
}

impl Decoder for DelimitedLineCodec {
    type Item = BytesMut;
    type Error = FramingError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(end) = self.find_delimiter(buf) {
            self.next_index = 0;
            if end > self.max_length {
                return Err(FramingError::LineTooLong {
                    limit: self.max_length,
                });
            }
            let mut line = buf.split_to(end + self.delimiter.len());
            line.truncate(end);
            return Ok(Some(line));
        }

        if buf.len() >= self.max_length.saturating_add(self.delimiter.len()) {
            return Err(FramingError::LineTooLong {
                limit: self.max_length,
            });
        }
        self.next_index = buf.len();
        Ok(None)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(line) => Ok(Some(line)),
            None => {
                // An undelimited tail is not a request.
                buf.clear();
                self.next_index = 0;
                Ok(None)
            }
        }
    }
}
