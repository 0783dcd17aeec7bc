use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::layout::{DocumentSession, LayoutError};

struct StoredSession {
    session: Arc<DocumentSession>,
    last_access: DateTime<Utc>,
    /// Tie-breaker for accesses within the same clock tick.
    access_seq: u64,
}

#[derive(Default)]
struct StoreInner {
    sessions: HashMap<Uuid, StoredSession>,
    access_seq: u64,
}

impl StoreInner {
    fn touch(&mut self) -> (DateTime<Utc>, u64) {
        self.access_seq += 1;
        (Utc::now(), self.access_seq)
    }
}

/// Open document sessions by id. Sessions are shared with in-flight passes, so
/// removing one never interrupts a pass already running on it.
///
/// Holds at most `capacity` sessions; opening one more evicts the session
/// accessed least recently.
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<RwLock<StoreInner>>,
    capacity: usize,
}

impl DocumentStore {
    pub fn new(capacity: usize) -> Self {
        DocumentStore {
            inner: Arc::new(RwLock::new(StoreInner::default())),
            capacity: capacity.max(1),
        }
    }

    pub fn insert(&self, session: DocumentSession) -> Result<Arc<DocumentSession>, AppError> {
        let session = Arc::new(session);
        let mut inner = self
            .inner
            .write()
            .map_err(|_| LayoutError::SessionUnavailable("document store"))?;

        while inner.sessions.len() >= self.capacity {
            let oldest = inner
                .sessions
                .iter()
                .min_by_key(|(_, stored)| (stored.last_access, stored.access_seq))
                .map(|(id, stored)| (*id, stored.last_access));
            let Some((id, last_access)) = oldest else {
                break;
            };
            inner.sessions.remove(&id);
            tracing::info!(
                document = %id,
                last_access = %last_access,
                capacity = self.capacity,
                "document store full; least recently used session evicted"
            );
        }

        let (last_access, access_seq) = inner.touch();
        inner.sessions.insert(
            session.id(),
            StoredSession {
                session: Arc::clone(&session),
                last_access,
                access_seq,
            },
        );
        Ok(session)
    }

    /// Looks a session up and marks it as recently used.
    pub fn get(&self, id: Uuid) -> Result<Arc<DocumentSession>, AppError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| LayoutError::SessionUnavailable("document store"))?;
        let (last_access, access_seq) = inner.touch();
        let stored = inner
            .sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("document {id}")))?;
        stored.last_access = last_access;
        stored.access_seq = access_seq;
        Ok(Arc::clone(&stored.session))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| LayoutError::SessionUnavailable("document store"))?;
        inner
            .sessions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("document {id}")))
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.sessions.len()).unwrap_or(0)
    }
}

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub documents: DocumentStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let documents = DocumentStore::new(config.max_open_documents);
        AppState { config, documents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutInputs, PageGeometry, Paginator};

    fn make_session() -> DocumentSession {
        DocumentSession::open(
            Uuid::new_v4(),
            LayoutInputs::default(),
            Paginator::with_metrics(PageGeometry::A4),
        )
        .unwrap()
    }

    #[test]
    fn test_overfilled_store_evicts_least_recently_used() {
        let store = DocumentStore::new(2);
        let first = store.insert(make_session()).unwrap().id();
        let second = store.insert(make_session()).unwrap().id();

        // Reading the first one makes the second the eviction candidate.
        store.get(first).unwrap();
        let third = store.insert(make_session()).unwrap().id();

        assert_eq!(store.len(), 2);
        assert!(store.get(first).is_ok());
        assert!(matches!(store.get(second), Err(AppError::NotFound(_))));
        assert!(store.get(third).is_ok());
    }

    #[test]
    fn test_store_never_exceeds_capacity() {
        let store = DocumentStore::new(3);
        let ids: Vec<Uuid> = (0..10)
            .map(|_| store.insert(make_session()).unwrap().id())
            .collect();
        assert_eq!(store.len(), 3);
        for id in &ids[..7] {
            assert!(store.get(*id).is_err());
        }
        for id in &ids[7..] {
            assert!(store.get(*id).is_ok());
        }
    }

    #[test]
    fn test_evicted_session_stays_usable_by_its_holder() {
        let store = DocumentStore::new(1);
        let held = store.insert(make_session()).unwrap();
        store.insert(make_session()).unwrap();
        assert!(store.get(held.id()).is_err());
        assert_eq!(held.current().unwrap().pass, 1);
    }
}
