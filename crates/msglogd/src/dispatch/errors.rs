//! Reasons a request line fails to parse.
//!
//! These never reach the client as text; each maps to the [`ResultCode`]
//! that is sent instead.

use thiserror::Error;

use super::ResultCode;

/// Errors surfaced while turning a line into a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The verb is not in the catalog.
    #[error("unknown request verb: {verb}")]
    UnknownVerb { verb: String },

    /// A required argument is absent.
    #[error("{verb} is missing its {argument} argument")]
    MissingArgument {
        verb: &'static str,
        argument: &'static str,
    },

    /// Arguments were supplied to a verb that takes fewer.
    #[error("{verb} does not accept argument '{extra}'")]
    UnexpectedArgument { verb: &'static str, extra: String },

    /// A priority argument does not name a valid priority.
    #[error("invalid priority: {text}")]
    InvalidPriority { text: String },
}

impl CommandError {
    /// Returns the result code reported to the client for this error.
    pub const fn result_code(&self) -> ResultCode {
        match self {
            Self::UnknownVerb { .. } => ResultCode::UnknownRequest,
            Self::MissingArgument { .. } | Self::UnexpectedArgument { .. } => {
                ResultCode::InvalidArguments
            }
            Self::InvalidPriority { .. } => ResultCode::InvalidPriority,
        }
    }

    /// Creates an unknown verb error.
    pub fn unknown_verb(verb: impl Into<String>) -> Self {
        Self::UnknownVerb { verb: verb.into() }
    }

    /// Creates a missing argument error.
    pub const fn missing_argument(verb: &'static str, argument: &'static str) -> Self {
        Self::MissingArgument { verb, argument }
    }

    /// Creates an unexpected argument error.
    pub fn unexpected_argument(verb: &'static str, extra: impl Into<String>) -> Self {
        Self::UnexpectedArgument {
            verb,
            extra: extra.into(),
        }
    }

    /// Creates an invalid priority error.
    pub fn invalid_priority(text: impl Into<String>) -> Self {
        Self::InvalidPriority { text: text.into() }
    }
}
