//! Chat fan-out to every registered session

use relay_common::protocol::ServerMessage;

use super::SessionRegistry;
use super::session::Session;
use crate::constants::MSG_CHAT_PUBLISHED;
use crate::history::HistoryLog;

/// Appends chat lines to history and relays them to all sessions
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: SessionRegistry,
    history: HistoryLog,
}

impl Broadcaster {
    /// Create a broadcaster over a registry and history log
    pub fn new(registry: SessionRegistry, history: HistoryLog) -> Self {
        Self { registry, history }
    }

    /// Publish a chat line
    ///
    /// Holds the registry lock while appending `text` to the history and then
    /// queueing it to every registered session, the sender included. All
    /// sessions therefore see lines in history order. A session whose handler
    /// is already gone is skipped silently; nothing is retried.
    ///
    /// Returns the number of sessions the line was offered to.
    pub async fn publish(&self, text: String, sender: &Session) -> usize {
        let sessions = self.registry.sessions.lock().await;

        self.history.append(text.clone()).await;

        for session in sessions.iter() {
            session.send(ServerMessage::Chat { line: text.clone() });
        }

        tracing::trace!(
            session_id = sender.session_id,
            username = %sender.username,
            recipients = sessions.len(),
            "{}",
            MSG_CHAT_PUBLISHED
        );

        sessions.len()
    }
}
