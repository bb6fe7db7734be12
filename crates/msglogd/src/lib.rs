//! Message log daemon.
//!
//! `msglogd` accepts TCP connections, reads delimiter-framed request lines,
//! and applies them to a single in-memory [`MessageLog`] shared by every
//! connection. Each connection is served by a session task that sanitizes
//! each line, hands it to a [`RequestDispatcher`], and queues the textual
//! response without waiting for earlier writes to flush.
//!
//! Startup follows [`bootstrap_with`]: configuration is loaded through
//! [`msglog_config`], telemetry is installed, the listening socket is bound,
//! and the log is created. [`HealthReporter`] hooks observe each stage.
//! [`run_daemon`] wraps the whole lifecycle for the binary and stops on
//! Ctrl-C.

mod bootstrap;
pub mod dispatch;
mod health;
pub mod message_log;
mod process;
mod telemetry;
pub mod transport;

pub use bootstrap::{BootstrapError, ConfigLoader, Daemon, SystemConfigLoader, bootstrap_with};
pub use dispatch::{CommandDispatcher, Request, RequestDispatcher, ResponseBuffer, ResultCode};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use message_log::{Message, MessageError, MessageLog, MessageLogGuard, Priority};
pub use process::{LaunchError, ShutdownError, run_daemon};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{ConnectionAcceptor, ListenerError};

#[cfg(test)]
mod tests;
