use std::fmt;

use crate::message_log::MessageLog;

use super::ResponseBuffer;

/// A parsed unit of work.
///
/// Requests are produced by a [`RequestDispatcher`](super::RequestDispatcher)
/// and consumed exactly once by the session that parsed them.
pub trait Request: fmt::Debug + Send {
    /// Applies the request to the log and appends any extra response text.
    fn serve(self: Box<Self>, log: &MessageLog, response: &mut ResponseBuffer);
}
