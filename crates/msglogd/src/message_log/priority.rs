use std::fmt;

/// Severity attached to every logged message.
///
/// Variants are declared in ascending order, so the derived ordering is the
/// ordinal one used for dump floors: `Debug < Info < Warning < Critical <
/// Error`. [`Priority::Illegal`] is the result of failed text lookups and can
/// never be stored in a [`Message`](super::Message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Diagnostic chatter.
    Debug,
    /// Routine information.
    Info,
    /// Something unexpected but recoverable.
    Warning,
    /// Degraded operation.
    Critical,
    /// Failure.
    Error,
    /// Sentinel for unrecognised text; not a valid message priority.
    Illegal,
}

impl Priority {
    /// Every constructible priority, in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Critical,
        Self::Error,
    ];

    /// Looks up a priority by its exact, case-sensitive wire name.
    ///
    /// Any other text, including `"Illegal"`, yields [`Priority::Illegal`].
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match text {
            "Debug" => Self::Debug,
            "Info" => Self::Info,
            "Warning" => Self::Warning,
            "Critical" => Self::Critical,
            "Error" => Self::Error,
            _ => Self::Illegal,
        }
    }

    /// Returns the canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
            Self::Error => "Error",
            Self::Illegal => "Illegal",
        }
    }

    /// Reports whether a message may carry this priority.
    #[must_use]
    pub const fn is_legal(self) -> bool {
        !matches!(self, Self::Illegal)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
