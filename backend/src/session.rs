//! In-memory session store.
//!
//! Maps generated session IDs to the sum computed for a deferred submission.
//! Entries are never removed or updated and live until the process exits.

use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;
use std::sync::Arc;
use tally_types::SumResponse;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Registry mapping session IDs to stored results.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SumResponse>>>,
}

impl SessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a result under a freshly generated ID and return that ID.
    pub async fn insert(&self, result: SumResponse) -> String {
        let mut map = self.inner.write().await;
        loop {
            let id = Uuid::new_v4().to_string();
            if let MapEntry::Vacant(slot) = map.entry(id.clone()) {
                slot.insert(result);
                return id;
            }
        }
    }

    /// Look up the result stored for a session ID.
    pub async fn get(&self, session_id: &str) -> Option<SumResponse> {
        let map = self.inner.read().await;
        map.get(session_id).cloned()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether no session has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
