//! Shared configuration for the message log daemon.
//!
//! Configuration is layered by [`ortho_config`]: built-in defaults are
//! overridden by a configuration file (`--config-path` or
//! `MSGLOG_CONFIG_PATH`), then by `MSGLOG_*` environment variables, and
//! finally by command-line flags such as `--listen-port 9000`.

mod defaults;
mod delimiter;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_LOG_FILTER, DEFAULT_MAX_LINE_BYTES,
    DEFAULT_WORKER_THREADS, default_listen_host, default_listen_port,
    default_log_filter_string, default_log_format, default_max_line_bytes,
    default_request_delimiter, default_worker_threads,
};
pub use delimiter::{RequestDelimiter, RequestDelimiterParseError};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "MSGLOG")]
pub struct Config {
    /// Host or address the acceptor binds to.
    #[serde(default = "defaults::default_listen_host")]
    #[ortho_config(default = defaults::default_listen_host())]
    pub listen_host: String,
    /// TCP port the acceptor binds to.
    #[serde(default = "defaults::default_listen_port")]
    #[ortho_config(default = defaults::DEFAULT_LISTEN_PORT)]
    pub listen_port: u16,
    /// Byte sequence terminating each request line.
    #[serde(default = "defaults::default_request_delimiter")]
    #[ortho_config(default = defaults::default_request_delimiter())]
    pub request_delimiter: RequestDelimiter,
    /// Largest undelimited line a session buffers before closing.
    #[serde(default = "defaults::default_max_line_bytes")]
    #[ortho_config(default = defaults::DEFAULT_MAX_LINE_BYTES)]
    pub max_line_bytes: usize,
    /// Runtime worker threads; `1` selects the single-threaded loop.
    #[serde(default = "defaults::default_worker_threads")]
    #[ortho_config(default = defaults::DEFAULT_WORKER_THREADS)]
    pub worker_threads: usize,
    /// `tracing` filter expression.
    #[serde(default = "defaults::default_log_filter_string")]
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records.
    #[serde(default = "defaults::default_log_format")]
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_host: default_listen_host(),
            listen_port: DEFAULT_LISTEN_PORT,
            request_delimiter: default_request_delimiter(),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            worker_threads: DEFAULT_WORKER_THREADS,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Host the acceptor binds to.
    #[must_use]
    pub fn listen_host(&self) -> &str {
        &self.listen_host
    }

    /// Port the acceptor binds to.
    #[must_use]
    pub const fn listen_port(&self) -> u16 {
        self.listen_port
    }

    /// Delimiter framing each request line.
    #[must_use]
    pub const fn request_delimiter(&self) -> RequestDelimiter {
        self.request_delimiter
    }

    /// Maximum buffered bytes for a single undelimited line.
    #[must_use]
    pub const fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Number of runtime worker threads.
    #[must_use]
    pub const fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Rejects values the daemon cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the line limit or the worker count is
    /// zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_bytes == 0 {
            return Err(ConfigError::ZeroLineLimit);
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

/// Semantic errors in an otherwise well-formed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `max_line_bytes` was zero.
    #[error("max_line_bytes must be greater than zero")]
    ZeroLineLimit,
    /// `worker_threads` was zero.
    #[error("worker_threads must be greater than zero")]
    ZeroWorkers,
}
