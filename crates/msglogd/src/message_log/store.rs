use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Message, Priority};

/// Thread-safe, insertion-ordered message log.
///
/// One instance is created before the acceptor starts and shared through an
/// `Arc` with every session and request. Each method takes the lock for its
/// own duration; use [`MessageLog::scoped_access`] to group operations.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Mutex<Vec<Message>>,
}

impl MessageLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the tail.
    pub fn append(&self, message: Message) {
        self.scoped_access().append(message);
    }

    /// Writes every stored message at or above `floor`, one per line, in
    /// insertion order.
    ///
    /// The lock is held for the whole dump, so the output is a consistent
    /// snapshot even while other sessions append.
    ///
    /// # Errors
    ///
    /// Propagates formatting errors from `out`.
    pub fn snapshot_dump<W>(&self, out: &mut W, floor: Priority) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        self.scoped_access().dump(out, floor)
    }

    /// Clones every stored message at or above `floor`, in insertion order.
    #[must_use]
    pub fn snapshot(&self, floor: Priority) -> Vec<Message> {
        self.scoped_access().iter_from(floor).cloned().collect()
    }

    /// Number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scoped_access().len()
    }

    /// Reports whether the log holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Acquires exclusive access until the returned guard is dropped.
    ///
    /// The guard releases the lock on every exit path, including early
    /// returns and unwinding.
    pub fn scoped_access(&self) -> MessageLogGuard<'_> {
        // A panic while holding the lock cannot leave the vector half-written,
        // so a poisoned lock is still safe to use.
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        MessageLogGuard { entries }
    }
}

/// Exclusive view of a [`MessageLog`] obtained from
/// [`MessageLog::scoped_access`].
pub struct MessageLogGuard<'a> {
    entries: MutexGuard<'a, Vec<Message>>,
}

impl MessageLogGuard<'_> {
    /// Appends a message at the tail.
    pub fn append(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// Reports whether a structurally equal message is already stored.
    #[must_use]
    pub fn contains(&self, message: &Message) -> bool {
        self.entries.contains(message)
    }

    /// Iterates over messages at or above `floor` in insertion order.
    pub fn iter_from(&self, floor: Priority) -> impl Iterator<Item = &Message> {
        self.entries
            .iter()
            .filter(move |message| message.priority() >= floor)
    }

    /// Number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Writes messages at or above `floor`, one per line.
    ///
    /// # Errors
    ///
    /// Propagates formatting errors from `out`.
    pub fn dump<W>(&self, out: &mut W, floor: Priority) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        for message in self.iter_from(floor) {
            writeln!(out, "{message}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for MessageLogGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageLogGuard")
            .field("len", &self.entries.len())
            .finish()
    }
}
