//! Listener setup and the accept loop

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::connection::{self, ConnectionParams};
use crate::constants::*;
use crate::state::RelayState;

/// Listen backlog handed to the OS
const LISTEN_BACKLOG: i32 = 1024;

/// Bind a TCP listener with address reuse enabled
///
/// # Errors
///
/// Returns an error if the socket cannot be created, bound or put into
/// listening mode.
pub fn bind_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;
    TcpListener::from_std(socket.into())
}

/// Accepts connections and runs one tracked session task per connection
pub struct ConnectionAcceptor {
    listener: TcpListener,
    state: RelayState,
    workers: JoinSet<()>,
}

impl ConnectionAcceptor {
    /// Create an acceptor over a bound listener
    pub fn new(listener: TcpListener, state: RelayState) -> Self {
        Self {
            listener,
            state,
            workers: JoinSet::new(),
        }
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Number of session tasks that have not been reaped yet
    pub fn active_workers(&self) -> usize {
        self.workers.len()
    }

    /// Accept connections until `shutdown` resolves
    ///
    /// Each connection gets its own task; the loop never waits for one to
    /// finish. Finished tasks are reaped as the loop runs. On shutdown every
    /// remaining task is aborted, closing its connection without draining.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("{}", MSG_SHUTDOWN_RECEIVED);
                    break;
                }

                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((socket, peer_addr)) => self.spawn_session(socket, peer_addr),
                        Err(e) => tracing::warn!("{}{}", ERR_ACCEPT, e),
                    }
                }

                Some(finished) = self.workers.join_next(), if !self.workers.is_empty() => {
                    match finished {
                        Err(e) if e.is_panic() => {
                            tracing::error!(error = %e, "{}", ERR_WORKER_PANICKED);
                        }
                        _ => {}
                    }
                }
            }
        }

        self.workers.shutdown().await;
    }

    fn spawn_session(&mut self, socket: tokio::net::TcpStream, peer_addr: SocketAddr) {
        let params = ConnectionParams {
            peer_addr,
            state: self.state.clone(),
        };

        self.workers.spawn(async move {
            if let Err(e) = connection::handle_connection(socket, params).await {
                tracing::warn!(peer = %peer_addr, error = %e, "{}", ERR_CONNECTION);
            }
        });
    }
}
