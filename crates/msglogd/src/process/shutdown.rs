use std::io;

use thiserror::Error;

/// Abstraction over shutdown notification mechanisms.
pub(crate) trait ShutdownSignal: Send + Sync {
    /// Completes once shutdown should proceed.
    async fn wait(&self) -> Result<(), ShutdownError>;
}

/// Errors reported by shutdown signal listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing the signal handler failed.
    #[error("failed to install signal handler: {source}")]
    Install {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Shutdown listener that waits for Ctrl-C.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CtrlCShutdownSignal;

impl ShutdownSignal for CtrlCShutdownSignal {
    async fn wait(&self) -> Result<(), ShutdownError> {
        tokio::signal::ctrl_c()
            .await
            .map_err(|source| ShutdownError::Install { source })
    }
}
