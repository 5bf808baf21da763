//! Session representation for authenticated connections

use std::net::SocketAddr;

use relay_common::protocol::ServerMessage;
use tokio::sync::mpsc;

/// Outbound queue feeding one session's socket writer
pub type SessionSender = mpsc::UnboundedSender<ServerMessage>;

/// Receiving end of a session's outbound queue, drained by its handler
pub type SessionReceiver = mpsc::UnboundedReceiver<ServerMessage>;

/// Parameters for creating a new session
pub struct NewSessionParams {
    pub session_id: u32,
    pub username: String,
    pub address: SocketAddr,
    pub tx: SessionSender,
}

/// One authenticated, live client connection and its identity
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique identifier for this connection (the removal key)
    pub session_id: u32,
    /// Username the client authenticated with
    pub username: String,
    /// Remote address of the connection
    pub address: SocketAddr,
    /// Channel sender for queueing messages to this session
    pub tx: SessionSender,
}

impl Session {
    /// Create a new session
    pub fn new(params: NewSessionParams) -> Self {
        Self {
            session_id: params.session_id,
            username: params.username,
            address: params.address,
            tx: params.tx,
        }
    }

    /// Whether the session's handler is still draining its queue
    pub fn is_alive(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Queue a message for this session
    ///
    /// Returns `false` if the handler has already gone away. Callers treat
    /// that the same as success: the handler deregisters itself.
    pub fn send(&self, message: ServerMessage) -> bool {
        self.tx.send(message).is_ok()
    }
}
