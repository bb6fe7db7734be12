use std::fmt;

/// Outcome of parsing a request line, sent to the client as the first
/// response line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// The line parsed into a request.
    Ok,
    /// The verb is not part of the catalog.
    UnknownRequest,
    /// The verb is known but its arguments are missing or surplus.
    InvalidArguments,
    /// A priority argument is not a valid priority name.
    InvalidPriority,
}

impl ResultCode {
    /// Short canonical rendering sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::UnknownRequest => "ERR_UNKNOWN",
            Self::InvalidArguments => "ERR_ARGS",
            Self::InvalidPriority => "ERR_PRIORITY",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
