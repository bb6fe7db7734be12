//! Response text accumulated while processing one request line.

use std::fmt;

use bytes::Bytes;
use msglog_config::RequestDelimiter;

use super::ResultCode;

/// Text buffer for a single response.
///
/// Every line ends with the configured wire terminator. Text written through
/// [`fmt::Write`] has each `\n` translated to that terminator, so
/// line-oriented writers such as
/// [`MessageLog::snapshot_dump`](crate::message_log::MessageLog::snapshot_dump)
/// produce wire-ready output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseBuffer {
    text: String,
    terminator: &'static str,
}

impl ResponseBuffer {
    /// Creates an empty buffer terminating lines with `delimiter`.
    #[must_use]
    pub fn new(delimiter: RequestDelimiter) -> Self {
        Self {
            text: String::new(),
            terminator: delimiter.as_str(),
        }
    }

    /// Writes the rendered result code as a line.
    pub fn write_status(&mut self, code: ResultCode) {
        self.write_line(code.as_str());
    }

    /// Writes `line` followed by the terminator.
    pub fn write_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push_str(self.terminator);
    }

    /// Accumulated text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the buffer, yielding the bytes to send.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.text)
    }
}

impl fmt::Write for ResponseBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut pieces = s.split('\n');
        if let Some(first) = pieces.next() {
            self.text.push_str(first);
        }
        for piece in pieces {
            self.text.push_str(self.terminator);
            self.text.push_str(piece);
        }
        Ok(())
    }
}
