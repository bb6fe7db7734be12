//! Test helpers for the transport module.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::dispatch::{CommandDispatcher, Parsed, RequestDispatcher};

/// Dispatcher that counts parse calls and delegates to the catalog.
#[derive(Debug, Default)]
pub(crate) struct CountingDispatcher {
    calls: AtomicUsize,
    inner: CommandDispatcher,
}

impl CountingDispatcher {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RequestDispatcher for CountingDispatcher {
    fn parse(&self, line: &str) -> Parsed {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.parse(line)
    }
}
