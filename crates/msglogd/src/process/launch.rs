//! Builds the runtime and serves until shutdown.

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::dispatch::{CommandDispatcher, RequestDispatcher};
use crate::health::{HealthReporter, StructuredHealthReporter};

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{CtrlCShutdownSignal, ShutdownSignal};

/// Collaborators required to launch the daemon runtime.
pub(crate) struct LaunchPlan<L, S> {
    pub(crate) loader: L,
    pub(crate) reporter: Arc<dyn HealthReporter>,
    pub(crate) dispatcher: Arc<dyn RequestDispatcher>,
    pub(crate) shutdown: S,
}

/// Runs the daemon using the production collaborators.
///
/// Returns once Ctrl-C is received.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap fails, the runtime cannot be
/// built, or the acceptor stops.
pub fn run_daemon() -> Result<(), LaunchError> {
    run_daemon_with(LaunchPlan {
        loader: SystemConfigLoader,
        reporter: Arc::new(StructuredHealthReporter::new()),
        dispatcher: Arc::new(CommandDispatcher::new()),
        shutdown: CtrlCShutdownSignal,
    })
}

/// Runs the daemon with injected collaborators.
pub(crate) fn run_daemon_with<L, S>(plan: LaunchPlan<L, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    S: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        reporter,
        dispatcher,
        shutdown,
    } = plan;

    let daemon = bootstrap_with(&loader, reporter)?;
    let workers = daemon.config().worker_threads();
    let runtime = build_runtime(workers).map_err(|source| LaunchError::Runtime { source })?;
    info!(
        target: PROCESS_TARGET,
        workers,
        address = %daemon.local_addr(),
        "starting daemon runtime"
    );

    runtime.block_on(async move {
        tokio::select! {
            outcome = daemon.serve(dispatcher) => match outcome {
                Ok(never) => match never {},
                Err(error) => Err(LaunchError::from(error)),
            },
            signal = shutdown.wait() => {
                signal?;
                info!(target: PROCESS_TARGET, "shutdown signal received");
                Ok(())
            }
        }
    })?;

    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}

/// One worker selects a current-thread runtime; more select a pool.
fn build_runtime(workers: usize) -> std::io::Result<Runtime> {
    if workers <= 1 {
        Builder::new_current_thread().enable_all().build()
    } else {
        Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name("msglogd-worker")
            .enable_all()
            .build()
    }
}
