//! Connected-users announcements

use relay_common::protocol::{Roster, ServerMessage};

use super::SessionRegistry;
use super::session::Session;

/// Builds the roster from the live session set and sends it to everyone
#[derive(Debug, Clone)]
pub struct RosterNotifier {
    registry: SessionRegistry,
}

impl RosterNotifier {
    /// Create a notifier over a registry
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }

    /// Send the current roster to every registered session
    ///
    /// The roster is computed and queued under the registry lock, so its count
    /// always equals the number of sessions that receive it.
    pub async fn announce(&self) -> Roster {
        let sessions = self.registry.sessions.lock().await;
        Self::announce_to(&sessions)
    }

    /// Queue the roster of `sessions` to each of them
    ///
    /// Caller must hold the registry lock; joins and leaves announce from
    /// inside their own critical section so no chat line can be queued
    /// between the membership change and its roster.
    pub(super) fn announce_to(sessions: &[Session]) -> Roster {
        let roster = Roster::new(sessions.iter().map(|s| s.username.clone()).collect());
        for session in sessions {
            session.send(ServerMessage::Roster(roster.clone()));
        }
        roster
    }
}
