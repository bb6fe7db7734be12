use crate::delimiter::RequestDelimiter;
use crate::logging::LogFormat;

/// Default bind address: all IPv4 interfaces.
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";

/// Default TCP port for the acceptor.
pub const DEFAULT_LISTEN_PORT: u16 = 9876;

/// Default upper bound for a single buffered request line.
pub const DEFAULT_MAX_LINE_BYTES: usize = 4096;

/// Default worker count; one thread means a single cooperative loop.
pub const DEFAULT_WORKER_THREADS: usize = 1;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned default bind address.
pub fn default_listen_host() -> String {
    DEFAULT_LISTEN_HOST.to_owned()
}

/// Default TCP port, as a function for serde.
pub const fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

/// Default request delimiter (`\r\n`).
pub const fn default_request_delimiter() -> RequestDelimiter {
    RequestDelimiter::Crlf
}

/// Default line limit, as a function for serde.
pub const fn default_max_line_bytes() -> usize {
    DEFAULT_MAX_LINE_BYTES
}

/// Default worker count, as a function for serde.
pub const fn default_worker_threads() -> usize {
    DEFAULT_WORKER_THREADS
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
