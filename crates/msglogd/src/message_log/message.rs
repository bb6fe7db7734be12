use std::fmt;

use thiserror::Error;

use super::Priority;

/// Errors raised when constructing a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The requested priority was [`Priority::Illegal`].
    #[error("messages cannot carry the Illegal priority")]
    IllegalPriority,
}

/// Immutable log entry.
///
/// Equality is structural over body, username and priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    body: String,
    username: String,
    priority: Priority,
}

impl Message {
    /// Builds a message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::IllegalPriority`] when `priority` is
    /// [`Priority::Illegal`].
    pub fn new(
        body: impl Into<String>,
        username: impl Into<String>,
        priority: Priority,
    ) -> Result<Self, MessageError> {
        if !priority.is_legal() {
            return Err(MessageError::IllegalPriority);
        }
        Ok(Self {
            body: body.into(),
            username: username.into(),
            priority,
        })
    }

    /// Message text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Author of the message.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Priority the message was logged with.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}

/// Renders the dump form, `u[<username>] p[<priority>] m[<body>]`.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "u[{}] p[{}] m[{}]",
            self.username, self.priority, self.body
        )
    }
}
