//! Application state management.

use crate::session::SessionStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Default)]
struct AppStateInner {
    /// Results of deferred submissions, indexed by session ID
    sessions: SessionStore,
}

impl AppState {
    /// Create new application state with an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create application state around an existing session store.
    pub fn with_sessions(sessions: SessionStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { sessions }),
        }
    }

    /// Get the session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }
}
