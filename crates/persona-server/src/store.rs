//! Session store: one chat `Session` per connected browser tab.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use persona_ai::Session;
use persona_common::SessionId;
use tokio::sync::{Mutex, RwLock};

struct Entry {
    /// Locked for the whole of a gateway call, so each session has at most
    /// one request in flight and its transcript stays in submission order.
    session: Arc<Mutex<Session>>,
    last_active: Instant,
}

/// Thread-safe session store.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session and return its id.
    pub async fn create(&self) -> SessionId {
        let id = SessionId::new();
        self.sessions.write().await.insert(
            id.clone(),
            Entry {
                session: Arc::new(Mutex::new(Session::new())),
                last_active: Instant::now(),
            },
        );
        id
    }

    /// Look up a session and mark it active.
    pub async fn get(&self, id: &SessionId) -> Option<Arc<Mutex<Session>>> {
        let mut map = self.sessions.write().await;
        let entry = map.get_mut(id)?;
        entry.last_active = Instant::now();
        Some(entry.session.clone())
    }

    /// Drop a session. Returns false if it did not exist.
    pub async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Drop sessions idle for at least `max_idle`. Sessions with a request
    /// in progress are kept. Returns how many were removed.
    pub async fn reap_stale(&self, max_idle: Duration) -> usize {
        let mut map = self.sessions.write().await;
        let now = Instant::now();
        let before = map.len();
        map.retain(|id, entry| {
            let in_use = Arc::strong_count(&entry.session) > 1;
            let stale = !in_use && now.duration_since(entry.last_active) >= max_idle;
            if stale {
                tracing::info!(session = %id, "Reaping idle session");
            }
            !stale
        });
        before - map.len()
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
