use std::sync::Arc;

use tokio::sync::Notify;

use crate::process::ShutdownError;
use crate::process::shutdown::ShutdownSignal;

/// Shutdown signal triggered explicitly by a test.
#[derive(Debug, Clone, Default)]
pub struct TestShutdownSignal {
    notify: Arc<Notify>,
}

impl TestShutdownSignal {
    /// Releases the waiting daemon, even if it has not started waiting yet.
    pub fn trigger(&self) {
        self.notify.notify_one();
    }
}

impl ShutdownSignal for TestShutdownSignal {
    async fn wait(&self) -> Result<(), ShutdownError> {
        self.notify.notified().await;
        Ok(())
    }
}
