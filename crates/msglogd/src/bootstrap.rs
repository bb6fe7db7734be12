//! Daemon bootstrap orchestration.

use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use msglog_config::{Config, ConfigError};

use crate::dispatch::RequestDispatcher;
use crate::health::HealthReporter;
use crate::message_log::MessageLog;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{ConnectionAcceptor, ListenerError, ServiceContext};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the daemon configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Configuration loaded but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The listening socket could not be bound.
    #[error("failed to bind listener: {source}")]
    Listener {
        /// Underlying listener error.
        #[source]
        source: ListenerError,
    },
}

/// Result of a successful bootstrap invocation.
///
/// The acceptor is already bound, so [`Daemon::local_addr`] reports the real
/// port even when the configuration asked for port `0`.
pub struct Daemon {
    config: Config,
    log: Arc<MessageLog>,
    acceptor: ConnectionAcceptor,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Daemon {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The log shared by every session this daemon serves.
    #[must_use]
    pub fn log(&self) -> Arc<MessageLog> {
        Arc::clone(&self.log)
    }

    /// Address the acceptor is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.acceptor.local_addr()
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Serves connections until the runtime shuts down.
    ///
    /// Must be polled inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the bound socket cannot be registered
    /// with the runtime.
    pub async fn serve(
        self,
        dispatcher: Arc<dyn RequestDispatcher>,
    ) -> Result<Infallible, ListenerError> {
        let Self {
            config,
            log,
            acceptor,
            reporter,
            ..
        } = self;
        let context = ServiceContext::new(
            log,
            dispatcher,
            config.request_delimiter(),
            config.max_line_bytes(),
        );
        reporter.listener_ready(acceptor.local_addr());
        acceptor.run(context).await
    }
}

impl fmt::Debug for Daemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Daemon")
            .field("config", &self.config)
            .field("acceptor", &self.acceptor)
            .field("telemetry", &self.telemetry)
            .finish_non_exhaustive()
    }
}

/// Bootstraps the daemon using the supplied collaborators.
///
/// Loads and validates configuration, installs telemetry, binds the
/// acceptor and creates the shared log. Every failure is reported to
/// `reporter` before it is returned.
///
/// # Errors
///
/// Returns [`BootstrapError`] naming the stage that failed.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();
    match assemble(loader, Arc::clone(&reporter)) {
        Ok(daemon) => {
            reporter.bootstrap_succeeded(daemon.config());
            Ok(daemon)
        }
        Err(error) => {
            reporter.bootstrap_failed(&error);
            Err(error)
        }
    }
}

fn assemble(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Daemon, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    config.validate()?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    let acceptor = ConnectionAcceptor::bind(config.listen_host(), config.listen_port())
        .map_err(|source| BootstrapError::Listener { source })?;

    Ok(Daemon {
        config,
        log: Arc::new(MessageLog::new()),
        acceptor,
        telemetry,
        reporter,
    })
}
