//! Connection acceptor for the daemon's TCP port.

use std::convert::Infallible;
use std::io;
use std::net::{SocketAddr, TcpListener as StdTcpListener, ToSocketAddrs};
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use super::{ListenerError, ServiceContext, Session, TRANSPORT_TARGET};

const ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// Accepts connections and spawns a session for each.
#[derive(Debug)]
pub struct ConnectionAcceptor {
    listener: StdTcpListener,
    local_addr: SocketAddr,
}

impl ConnectionAcceptor {
    /// Binds the listening socket.
    ///
    /// Binding happens eagerly so that address conflicts surface during
    /// bootstrap rather than after the runtime starts.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] when the host does not resolve or the
    /// address cannot be bound.
    pub fn bind(host: &str, port: u16) -> Result<Self, ListenerError> {
        let listener = bind_tcp(host, port)?;
        listener
            .set_nonblocking(true)
            .map_err(|source| ListenerError::NonBlocking { source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ListenerError::Register { source })?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Address the acceptor is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts connections forever.
    ///
    /// Each accepted socket becomes a [`Session`] task; the acceptor re-arms
    /// immediately. Accept errors are logged (once per distinct error kind in
    /// a row) and never stop the loop. The number of open sessions is not
    /// limited.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Register`] when the socket cannot be handed
    /// to the runtime; this is the only way the future completes.
    pub async fn run(self, context: ServiceContext) -> Result<Infallible, ListenerError> {
        let listener = TcpListener::from_std(self.listener)
            .map_err(|source| ListenerError::Register { source })?;
        info!(
            target: TRANSPORT_TARGET,
            address = %self.local_addr,
            "connection acceptor active"
        );

        let mut errors = AcceptErrors::default();
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    errors.clear();
                    debug!(target: TRANSPORT_TARGET, %peer, "accepted connection");
                    if let Err(error) = stream.set_nodelay(true) {
                        debug!(target: TRANSPORT_TARGET, %peer, %error, "failed to set TCP_NODELAY");
                    }
                    let session = Session::new(peer, stream, context.clone());
                    tokio::spawn(session.run());
                }
                Err(error) => {
                    if errors.should_report(error.kind()) {
                        warn!(
                            target: TRANSPORT_TARGET,
                            error = %error,
                            "socket accept error"
                        );
                    }
                    tokio::time::sleep(ERROR_BACKOFF).await;
                }
            }
        }
    }
}

/// Suppresses repeats of the same accept error kind in a row.
#[derive(Debug, Default)]
struct AcceptErrors {
    last: Option<io::ErrorKind>,
}

impl AcceptErrors {
    /// Records `kind`, returning whether it differs from the previous error.
    fn should_report(&mut self, kind: io::ErrorKind) -> bool {
        self.last.replace(kind) != Some(kind)
    }

    /// Forgets the previous error after a successful accept.
    fn clear(&mut self) {
        self.last = None;
    }
}

fn bind_tcp(host: &str, port: u16) -> Result<StdTcpListener, ListenerError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|source| ListenerError::Resolve {
            host: host.to_owned(),
            port,
            source,
        })?;
    let addr = addrs.next().ok_or_else(|| ListenerError::ResolveEmpty {
        host: host.to_owned(),
        port,
    })?;
    StdTcpListener::bind(addr).map_err(|source| ListenerError::BindTcp { addr, source })
}
