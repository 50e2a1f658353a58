//! Per-page sessions and their store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;
use uuid::Uuid;

use crate::reply::ReplyFetcher;
use crate::ui::{FormInput, FragmentSurface};
use crate::widget::ChatWidget;

/// Default idle timeout (30 minutes).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// The widget type bound to a browser page.
pub type PageWidget = ChatWidget<FragmentSurface, FormInput>;

/// One page load: its id and the widget serving it.
#[derive(Debug)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    id: String,
    widget: Mutex<PageWidget>,
    last_activity: RwLock<DateTime<Utc>>,
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Session {
    fn new(id: String, fetcher: Arc<dyn ReplyFetcher>) -> Self {
        let now = Utc::now();
        let widget = ChatWidget::new(FragmentSurface::new(id.clone()), FormInput::new(), fetcher);
        Self {
            inner: Arc::new(SessionInner {
                id,
                widget: Mutex::new(widget),
                last_activity: RwLock::new(now),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Lock the widget. Counts as activity.
    pub async fn widget(&self) -> MutexGuard<'_, PageWidget> {
        self.touch();
        self.inner.widget.lock().await
    }

    fn touch(&self) {
        let mut guard = self.inner.last_activity.write().unwrap();
        *guard = Utc::now();
    }

    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self.inner.last_activity.read().unwrap();
        match (Utc::now() - last).to_std() {
            Ok(idle) => idle > timeout,
            // Negative: clock skew.
            Err(_) => false,
        }
    }
}

/// Thread-safe store for sessions.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
    fetcher: Arc<dyn ReplyFetcher>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.len())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store whose widgets all use `fetcher`.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ReplyFetcher>) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
                fetcher,
            }),
        }
    }

    #[must_use]
    pub fn create(&self) -> Session {
        self.create_with_id(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn create_with_id(&self, id: impl Into<String>) -> Session {
        let id = id.into();
        let session = Session::new(id.clone(), Arc::clone(&self.inner.fetcher));
        self.inner
            .sessions
            .write()
            .unwrap()
            .insert(id.clone(), session.clone());
        info!(name: "session.created", session_id = %id, "Session created");
        session
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        self.inner.sessions.read().unwrap().get(id).cloned()
    }

    /// Get a session by ID, creating it if it doesn't exist.
    #[must_use]
    pub fn get_or_create(&self, id: &str) -> Session {
        let mut sessions = self.inner.sessions.write().unwrap();
        sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                info!(name: "session.created", session_id = %id, "Session created");
                Session::new(id.to_string(), Arc::clone(&self.inner.fetcher))
            })
            .clone()
    }

    pub fn remove(&self, id: &str) -> Option<Session> {
        self.inner.sessions.write().unwrap().remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.sessions.read().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions idle longer than `timeout`. Returns how many went.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.sessions.write().unwrap();
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }

    /// Sweep expired sessions every `interval` until the task is aborted.
    pub fn spawn_sweeper(&self, interval: Duration, timeout: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            // `interval` panics on a zero period.
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            loop {
                ticker.tick().await;
                let removed = store.cleanup_expired_with_timeout(timeout);
                if removed > 0 {
                    info!(
                        name: "session.swept",
                        removed = removed,
                        remaining = store.len(),
                        "Expired sessions removed"
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::ReplyUnavailable;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl ReplyFetcher for Echo {
        async fn fetch_reply(&self, message: &str) -> Result<String, ReplyUnavailable> {
            Ok(message.to_string())
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(Echo))
    }

    #[test]
    fn test_session_store() {
        let store = store();
        assert!(store.is_empty());

        let session = store.create();
        assert_eq!(store.len(), 1);

        let retrieved = store.get(session.id()).unwrap();
        assert_eq!(retrieved.id(), session.id());

        store.remove(session.id());
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_or_create_reuses_existing() {
        let store = store();
        let first = store.get_or_create("page-1");
        let second = store.get_or_create("page-1");
        assert_eq!(first.id(), second.id());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_or_create_concurrent_first_use() {
        let store = store();
        let shared = &store;
        let sessions: Vec<Session> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(move || shared.get_or_create("page-1")))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(store.len(), 1);
        let stored = store.get("page-1").unwrap();
        for session in &sessions {
            assert!(Arc::ptr_eq(&session.inner, &stored.inner));
        }
    }

    #[tokio::test]
    async fn test_sweeper_survives_zero_interval() {
        let store = store();
        let _ = store.create();

        let handle = store.spawn_sweeper(Duration::ZERO, Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(!handle.is_finished());
        assert!(store.is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn test_sessions_share_widget_state() {
        let store = store();
        let session = store.create_with_id("page-1");

        session.widget().await.begin_submit("hello").unwrap();

        let again = store.get("page-1").unwrap();
        assert_eq!(again.widget().await.transcript().message_count(), 1);
    }

    #[test]
    fn test_cleanup_expired() {
        let store = store();
        let _ = store.create();
        let _ = store.create();

        assert_eq!(store.cleanup_expired_with_timeout(DEFAULT_SESSION_TIMEOUT), 0);

        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(store.cleanup_expired_with_timeout(Duration::from_millis(1)), 2);
        assert!(store.is_empty());
    }
}
