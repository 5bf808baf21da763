//! Mutation and query methods for SessionRegistry

use relay_common::protocol::{Roster, ServerMessage};

use super::SessionRegistry;
use super::roster::RosterNotifier;
use super::session::Session;
use crate::history::HistoryLog;

impl SessionRegistry {
    /// Register a session at the end of the registry
    ///
    /// Duplicate usernames are allowed; each session is keyed by its ID.
    /// Nothing is announced; use [`SessionRegistry::join`] for client logins.
    pub async fn add(&self, session: Session) {
        self.sessions.lock().await.push(session);
    }

    /// Replay history to a session, register it and announce the new roster
    ///
    /// All three steps happen under the registry lock. Publishing takes the
    /// same lock, so a chat line reaches the new session exactly once (in the
    /// replay or live) and never ahead of the roster that follows the replay.
    pub async fn join(&self, session: Session, history: &HistoryLog) -> Roster {
        let mut sessions = self.sessions.lock().await;
        let entries = history.snapshot().await;
        session.send(ServerMessage::History { entries });
        sessions.push(session);
        RosterNotifier::announce_to(&sessions)
    }

    /// Deregister a session and announce the roster to the ones left
    ///
    /// Returns the removed session; nothing is announced if the ID was not
    /// registered.
    pub async fn leave(&self, session_id: u32) -> Option<(Session, Roster)> {
        let mut sessions = self.sessions.lock().await;
        let index = sessions.iter().position(|s| s.session_id == session_id)?;
        let session = sessions.remove(index);
        let roster = RosterNotifier::announce_to(&sessions);
        Some((session, roster))
    }

    /// Remove a session by ID without announcing, returning it if registered
    pub async fn remove(&self, session_id: u32) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let index = sessions.iter().position(|s| s.session_id == session_id)?;
        Some(sessions.remove(index))
    }

    /// Copy of all registered sessions in insertion order
    pub async fn snapshot(&self) -> Vec<Session> {
        self.sessions.lock().await.clone()
    }

    /// Number of registered sessions
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Whether no session is registered
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Whether a session with this ID is registered
    pub async fn contains(&self, session_id: u32) -> bool {
        self.sessions
            .lock()
            .await
            .iter()
            .any(|s| s.session_id == session_id)
    }
}
