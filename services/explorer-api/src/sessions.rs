//! In-memory table of live dashboard sessions.
//!
//! Sessions are kept in an LRU; when the table is full the least recently
//! used session is dropped and its id answers 404 afterwards. Each session
//! sits behind its own async mutex so events for one session are applied in
//! order while other sessions proceed independently.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lru::LruCache;
use reactive::DashboardSession;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// A session plus bookkeeping.
pub struct SessionEntry {
    pub session: DashboardSession,
    pub created_at: DateTime<Utc>,
    pub last_event_at: Option<DateTime<Utc>>,
    pub events_applied: u64,
}

impl SessionEntry {
    pub fn new(session: DashboardSession) -> Self {
        Self {
            session,
            created_at: Utc::now(),
            last_event_at: None,
            events_applied: 0,
        }
    }

    pub fn touch(&mut self) {
        self.last_event_at = Some(Utc::now());
        self.events_applied += 1;
    }
}

pub type SharedSession = Arc<Mutex<SessionEntry>>;

/// Statistics for the session table.
#[derive(Debug, Default)]
pub struct SessionStats {
    pub created: AtomicU64,
    pub evicted: AtomicU64,
    pub closed: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionStatsSnapshot {
    pub live: usize,
    pub created: u64,
    pub evicted: u64,
    pub closed: u64,
}

pub struct SessionStore {
    sessions: RwLock<LruCache<Uuid, SharedSession>>,
    stats: SessionStats,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        tracing::info!(capacity = capacity.get(), "Session store initialized");
        Self {
            sessions: RwLock::new(LruCache::new(capacity)),
            stats: SessionStats::default(),
        }
    }

    /// Store a new session and return its id.
    pub async fn insert(&self, session: DashboardSession) -> Uuid {
        let id = Uuid::new_v4();
        let entry = Arc::new(Mutex::new(SessionEntry::new(session)));

        let mut sessions = self.sessions.write().await;
        if let Some((evicted, _)) = sessions.push(id, entry) {
            if evicted != id {
                self.stats.evicted.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("explorer_sessions_evicted_total").increment(1);
                tracing::debug!(session = %evicted, "Evicted least recently used session");
            }
        }
        self.stats.created.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("explorer_sessions_created_total").increment(1);
        id
    }

    /// Look up a session, marking it recently used.
    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.write().await.get(id).cloned()
    }

    /// Drop a session. Returns whether it existed.
    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.pop(id).is_some();
        if removed {
            self.stats.closed.fetch_add(1, Ordering::Relaxed);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn stats(&self) -> SessionStatsSnapshot {
        SessionStatsSnapshot {
            live: self.len().await,
            created: self.stats.created.load(Ordering::Relaxed),
            evicted: self.stats.evicted.load(Ordering::Relaxed),
            closed: self.stats.closed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use derivations::DerivationConfig;
    use explorer_common::PageRouter;
    use reactive::{explorer_registry, ExplorerContext};
    use test_utils::{ames_store, routes};

    fn session() -> DashboardSession {
        let context = ExplorerContext::new(
            Arc::new(ames_store()),
            DerivationConfig::default(),
            PageRouter::standard(),
        );
        DashboardSession::open(
            Arc::new(explorer_registry(0).unwrap()),
            Arc::new(context),
            routes::INDEX,
        )
        .0
    }

    #[test]
    fn test_insert_get_remove() {
        tokio_test::block_on(async {
            let store = SessionStore::new(4);
            let id = store.insert(session()).await;
            assert!(store.get(&id).await.is_some());
            assert!(store.get(&Uuid::new_v4()).await.is_none());

            assert!(store.remove(&id).await);
            assert!(!store.remove(&id).await);
            assert!(store.is_empty().await);
        });
    }

    #[tokio::test]
    async fn test_eviction_drops_least_recent() {
        let store = SessionStore::new(2);
        let a = store.insert(session()).await;
        let b = store.insert(session()).await;
        // Touch a so b becomes the eviction candidate
        store.get(&a).await;
        let c = store.insert(session()).await;

        assert!(store.get(&a).await.is_some());
        assert!(store.get(&b).await.is_none());
        assert!(store.get(&c).await.is_some());

        let stats = store.stats().await;
        assert_eq!(stats.live, 2);
        assert_eq!(stats.created, 3);
        assert_eq!(stats.evicted, 1);
    }
}
