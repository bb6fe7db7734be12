//! Error types for transport operations.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced while binding or running the connection acceptor.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to resolve TCP address {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("no TCP addresses resolved for {host}:{port}")]
    ResolveEmpty { host: String, port: u16 },
    #[error("failed to bind TCP listener at {addr}: {source}")]
    BindTcp {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to enable non-blocking listener: {source}")]
    NonBlocking {
        #[source]
        source: io::Error,
    },
    #[error("failed to register listener with the runtime: {source}")]
    Register {
        #[source]
        source: io::Error,
    },
}

/// Errors that end a session while reading framed lines.
#[derive(Debug, Error)]
pub enum FramingError {
    /// A line grew past the configured limit without a delimiter.
    #[error("request line exceeds {limit} bytes")]
    LineTooLong { limit: usize },
    /// The socket read failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
