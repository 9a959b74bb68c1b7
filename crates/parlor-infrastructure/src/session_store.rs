//! Ephemeral chat store keyed by session id.
//!
//! Sessions live only in memory. Idle sessions are evicted before each
//! lookup or creation, and the table is capped by evicting the least
//! recently accessed sessions. There is no background sweeper.

use std::collections::HashMap;
use std::sync::Arc;

use parlor_core::clock::Clock;
use parlor_core::message::{Message, MessageWindow};
use parlor_core::session::{MAX_SESSIONS, SESSION_TTL_MS, Session};
use parlor_core::settings::{ApiSettings, SettingsUpdate};
use parlor_core::store::{ChatStore, ChatThread};
use parlor_core::{ParlorError, Result};
use tokio::sync::Mutex;

/// In-memory chat store: per-session history and settings.
///
/// Sessions carry no project instructions and no memories.
pub struct SessionStore {
    defaults: ApiSettings,
    clock: Arc<dyn Clock>,
    window: MessageWindow,
    ttl_ms: i64,
    capacity: usize,
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    /// Creates a store with the standard limits (30 minute TTL, 1000 sessions).
    pub fn new(defaults: ApiSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            defaults,
            clock,
            window: MessageWindow::default(),
            ttl_ms: SESSION_TTL_MS,
            capacity: MAX_SESSIONS,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_limits(mut self, ttl_ms: i64, capacity: usize) -> Self {
        self.ttl_ms = ttl_ms;
        self.capacity = capacity;
        self
    }

    pub fn with_window(mut self, window: MessageWindow) -> Self {
        self.window = window;
        self
    }

    /// Returns the session for `requested` if it is still alive, refreshing
    /// its access time, or creates a new one with default settings.
    ///
    /// Callers compare the returned id with `requested` to tell whether a
    /// new session was issued.
    pub async fn get_or_create_session(&self, requested: Option<&str>) -> Result<Session> {
        let now = self.clock.now_ms();
        let mut sessions = self.sessions.lock().await;
        self.evict(&mut sessions, now);

        if let Some(session) = requested.and_then(|id| sessions.get_mut(id)) {
            session.touch(now);
            return Ok(session.clone());
        }

        let session = Session::new(self.defaults.clone(), now);
        tracing::debug!(session_id = %session.id, live = sessions.len() + 1, "Created session");
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    /// Looks up a live session without refreshing it.
    pub async fn get_session(&self, id: &str) -> Result<Option<Session>> {
        let now = self.clock.now_ms();
        let mut sessions = self.sessions.lock().await;
        self.evict(&mut sessions, now);
        Ok(sessions.get(id).cloned())
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Drops expired sessions, then the least recently accessed ones while
    /// over capacity.
    fn evict(&self, sessions: &mut HashMap<String, Session>, now: i64) {
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.ttl_ms));
        let expired = before - sessions.len();

        let mut overflow = 0;
        if sessions.len() > self.capacity {
            let mut by_access: Vec<(i64, String)> = sessions
                .values()
                .map(|s| (s.last_accessed_at, s.id.clone()))
                .collect();
            by_access.sort();
            overflow = sessions.len() - self.capacity;
            for (_, id) in by_access.into_iter().take(overflow) {
                sessions.remove(&id);
            }
        }

        if expired > 0 || overflow > 0 {
            tracing::debug!(expired, overflow, live = sessions.len(), "Evicted sessions");
        }
    }

    async fn with_session<R, F>(&self, id: &str, f: F) -> Result<R>
    where
        F: FnOnce(&mut Session, i64) -> R + Send,
    {
        let now = self.clock.now_ms();
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| ParlorError::not_found("session", id))?;
        let value = f(session, now);
        session.touch(now);
        Ok(value)
    }
}

#[async_trait::async_trait]
impl ChatStore for SessionStore {
    /// Settings of the session, or the defaults when it is unknown.
    async fn settings(&self, thread_id: &str) -> Result<ApiSettings> {
        let sessions = self.sessions.lock().await;
        Ok(sessions
            .get(thread_id)
            .map(|s| s.settings.clone())
            .unwrap_or_else(|| self.defaults.clone()))
    }

    async fn update_settings(&self, thread_id: &str, update: SettingsUpdate) -> Result<ApiSettings> {
        self.with_session(thread_id, |session, _| {
            session.settings.apply(&update);
            session.settings.clone()
        })
        .await
    }

    /// History of the session; empty when it is unknown.
    async fn thread(&self, thread_id: &str) -> Result<ChatThread> {
        let sessions = self.sessions.lock().await;
        Ok(ChatThread {
            history: sessions
                .get(thread_id)
                .map(|s| s.messages.clone())
                .unwrap_or_default(),
            instructions: None,
            memories: Vec::new(),
        })
    }

    async fn append_message(&self, thread_id: &str, message: Message) -> Result<()> {
        let window = self.window;
        self.with_session(thread_id, |session, _| {
            window.push(&mut session.messages, message);
        })
        .await
    }

    async fn clear_messages(&self, thread_id: &str) -> Result<()> {
        self.with_session(thread_id, |session, _| session.messages.clear())
            .await
    }
}
