//! Session domain model.
//!
//! A session is the ephemeral counterpart of a conversation plus settings,
//! used when no durable store is configured.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Message;
use crate::settings::ApiSettings;

/// Idle time after which a session is evicted (30 minutes).
pub const SESSION_TTL_MS: i64 = 30 * 60 * 1000;

/// Maximum number of live sessions.
pub const MAX_SESSIONS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub messages: Vec<Message>,
    pub settings: ApiSettings,
    pub created_at: i64,
    pub last_accessed_at: i64,
}

impl Session {
    /// Creates a session with a fresh UUID and the given settings.
    pub fn new(settings: ApiSettings, now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
            settings,
            created_at: now,
            last_accessed_at: now,
        }
    }

    pub fn touch(&mut self, now: i64) {
        self.last_accessed_at = now;
    }

    /// True when the session has been idle for longer than `ttl_ms` at `now`.
    pub fn is_expired(&self, now: i64, ttl_ms: i64) -> bool {
        now - self.last_accessed_at > ttl_ms
    }
}
