//! Request parsing and dispatch.
//!
//! A session hands each sanitized line to a [`RequestDispatcher`], which
//! answers with a [`ResultCode`] and, when the line named a valid request, a
//! boxed [`Request`]. The session renders the code as the first response
//! line and then lets the request serve itself against the shared
//! [`MessageLog`](crate::message_log::MessageLog).
//!
//! ## Protocol
//!
//! [`CommandDispatcher`] understands the following lines (verbs are
//! case-insensitive, priorities are not):
//!
//! ```text
//! PING
//! POST <priority> <username> <body...>
//! POSTONCE <priority> <username> <body...>
//! DUMP [floor]
//! COUNT
//! ```

mod commands;
mod errors;
mod request;
mod response;
mod result;

pub use self::commands::CommandDispatcher;
pub use self::errors::CommandError;
pub use self::request::Request;
pub use self::response::ResponseBuffer;
pub use self::result::ResultCode;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Outcome of parsing one line.
pub type Parsed = (ResultCode, Option<Box<dyn Request>>);

/// Turns sanitized request lines into executable requests.
pub trait RequestDispatcher: Send + Sync + 'static {
    /// Parses one sanitized, non-empty line.
    ///
    /// Parsing never fails in the `Result` sense: unusable lines map to a
    /// non-success [`ResultCode`] and no request.
    fn parse(&self, line: &str) -> Parsed;
}
