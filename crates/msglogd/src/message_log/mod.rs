//! Priority-tagged, append-only message log shared by every session.
//!
//! The log is the only mutable state in the daemon. Every operation acquires
//! the log's lock for its own duration, so callers never need to hold a lock
//! before reading. Callers that must combine several operations atomically
//! (for example appending only when no equal message is stored) take a
//! [`MessageLogGuard`] through [`MessageLog::scoped_access`].

mod message;
mod priority;
mod store;

pub use self::message::{Message, MessageError};
pub use self::priority::Priority;
pub use self::store::{MessageLog, MessageLogGuard};
