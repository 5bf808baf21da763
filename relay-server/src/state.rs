//! Shared server state handed to every connection

use std::sync::Arc;

use crate::credentials::CredentialStore;
use crate::history::HistoryLog;
use crate::sessions::{Broadcaster, SessionRegistry};

/// Process-lifetime state shared by all session handlers
///
/// Cloning is cheap: every component is reference counted.
#[derive(Clone)]
pub struct RelayState {
    pub registry: SessionRegistry,
    pub history: HistoryLog,
    pub broadcaster: Broadcaster,
    pub credentials: Arc<dyn CredentialStore>,
}

impl RelayState {
    /// Create empty state around a credential store
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        let registry = SessionRegistry::new();
        let history = HistoryLog::new();
        Self {
            broadcaster: Broadcaster::new(registry.clone(), history.clone()),
            registry,
            history,
            credentials,
        }
    }
}
