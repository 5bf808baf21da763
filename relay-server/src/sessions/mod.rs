//! Session registry and fan-out for connected clients

mod broadcast;
mod registry;
mod roster;
pub mod session;
#[cfg(test)]
pub(crate) mod testing;

pub use broadcast::Broadcaster;
pub use roster::RosterNotifier;
pub use session::{NewSessionParams, Session, SessionReceiver, SessionSender};

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Mutex;

/// The set of currently connected sessions, in registration order
///
/// Every operation, including the broadcaster's and roster notifier's
/// fan-outs, is serialized behind one lock. Joins and leaves announce the
/// roster before releasing it.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    pub(super) sessions: Arc<Mutex<Vec<Session>>>,
    pub(super) next_id: Arc<AtomicU32>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU32::new(1)),
        }
    }

    /// Generate the next session ID
    pub fn next_session_id(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
