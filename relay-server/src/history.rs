//! Append-only chat history replayed to new sessions
//!
//! Entries are never mutated or removed, so the log length only grows.
//! There is no eviction: the log lives as long as the process.

use std::sync::Arc;

use tokio::sync::RwLock;

/// Ordered log of every chat line accepted by the broadcaster
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Arc<RwLock<Vec<String>>>,
}

impl HistoryLog {
    /// Create an empty history log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the tail of the log
    pub async fn append(&self, entry: String) {
        self.entries.write().await.push(entry);
    }

    /// Copy of the full log in insertion order
    pub async fn snapshot(&self) -> Vec<String> {
        self.entries.read().await.clone()
    }

    /// Number of entries appended so far
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing has been appended yet
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
