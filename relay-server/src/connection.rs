//! Client connection handling
//!
//! One handler runs per accepted connection and walks the session through
//! `Connecting -> Authenticating -> Active -> Closing -> Closed`.

use std::io;
use std::net::SocketAddr;

use strum::AsRefStr;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::mpsc;

use relay_common::io::{payload_buffer, read_payload, send_server_message};
use relay_common::protocol::{Credentials, ServerMessage, chat_line};

use crate::constants::*;
use crate::sessions::{NewSessionParams, Session, SessionReceiver};
use crate::state::RelayState;

/// Parameters for handling a connection
pub struct ConnectionParams {
    pub peer_addr: SocketAddr,
    pub state: RelayState,
}

/// Lifecycle of a single connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    Connecting,
    Authenticating,
    Active,
    Closing,
    Closed,
}

impl SessionState {
    /// Whether the state machine allows moving from `self` to `next`
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Connecting, Authenticating)
                | (Authenticating, Active)
                | (Authenticating, Closed)
                | (Active, Closing)
                | (Closing, Closed)
        )
    }
}

/// Connection state for a single client
struct ConnectionState {
    peer_addr: SocketAddr,
    state: SessionState,
}

impl ConnectionState {
    fn new(peer_addr: SocketAddr) -> Self {
        Self {
            peer_addr,
            state: SessionState::Connecting,
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid session transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::debug!(
            peer = %self.peer_addr,
            from = self.state.as_ref(),
            to = next.as_ref(),
            "{}",
            MSG_STATE_TRANSITION
        );
        self.state = next;
    }
}

/// Handle a client connection over any byte stream
pub async fn handle_connection<S>(socket: S, params: ConnectionParams) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let ConnectionParams { peer_addr, state } = params;

    let (mut reader, mut writer) = tokio::io::split(socket);
    let mut buffer = payload_buffer();
    let mut conn_state = ConnectionState::new(peer_addr);

    // The first payload carries the credentials; a closed or failed stream
    // counts as empty and takes the rejection path
    conn_state.transition(SessionState::Authenticating);
    let payload = match read_payload(&mut reader, &mut buffer).await {
        Ok(payload) => payload.unwrap_or_default(),
        Err(e) => {
            tracing::debug!(peer = %peer_addr, error = %e, "{}", ERR_CREDENTIAL_READ);
            String::new()
        }
    };
    let Credentials { username, secret } = Credentials::parse(&payload);

    if !state.credentials.authenticate(&username, &secret) {
        tracing::info!(peer = %peer_addr, username = %username, "{}", MSG_AUTH_REJECTED);
        // The peer may already be gone; nothing else to clean up
        let _ = send_server_message(&mut writer, &ServerMessage::AuthenticationFailed).await;
        let _ = writer.shutdown().await;
        conn_state.transition(SessionState::Closed);
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = Session::new(NewSessionParams {
        session_id: state.registry.next_session_id(),
        username,
        address: peer_addr,
        tx,
    });

    // Queue order is wire order: welcome, history replay, roster, live lines
    session.send(ServerMessage::Welcome {
        username: session.username.clone(),
    });
    let roster = state.registry.join(session.clone(), &state.history).await;
    conn_state.transition(SessionState::Active);
    tracing::debug!(
        peer = %peer_addr,
        session_id = session.session_id,
        username = %session.username,
        online = roster.count(),
        "{}",
        MSG_SESSION_JOINED
    );

    let result = relay_loop(
        &mut reader,
        &mut writer,
        &mut rx,
        &mut buffer,
        &session,
        &state,
    )
    .await;

    conn_state.transition(SessionState::Closing);
    if let Some((_, roster)) = state.registry.leave(session.session_id).await {
        tracing::debug!(
            peer = %peer_addr,
            session_id = session.session_id,
            username = %session.username,
            online = roster.count(),
            "{}",
            MSG_SESSION_LEFT
        );
    }

    let _ = writer.shutdown().await;
    conn_state.transition(SessionState::Closed);

    result
}

/// Relay chat from the client and drain queued messages to it
///
/// Returns `Ok(())` when the peer closes the connection and an error when a
/// read or write fails.
async fn relay_loop<S>(
    reader: &mut ReadHalf<S>,
    writer: &mut WriteHalf<S>,
    rx: &mut SessionReceiver,
    buffer: &mut [u8],
    session: &Session,
    state: &RelayState,
) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            result = read_payload(reader, buffer) => {
                match result? {
                    Some(payload) => {
                        let line = chat_line(&session.username, &payload);
                        state.broadcaster.publish(line, session).await;
                    }
                    None => return Ok(()),
                }
            }

            msg = rx.recv() => {
                match msg {
                    Some(msg) => send_server_message(writer, &msg).await?,
                    // The session owns a sender, so this only happens on teardown
                    None => return Ok(()),
                }
            }
        }
    }
}
