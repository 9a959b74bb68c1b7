//! User memories.
//!
//! A memory is a short fact entered by the user and injected into every
//! query built from the durable store, regardless of conversation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Maximum length of a memory, in characters.
pub const MAX_MEMORY_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: String,
    pub content: String,
    pub created_at: i64,
}

impl Memory {
    /// Creates a memory, truncating `content` to [`MAX_MEMORY_CHARS`].
    pub fn new(content: &str, now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.chars().take(MAX_MEMORY_CHARS).collect(),
            created_at: now,
        }
    }
}

/// An abstract repository for the flat memory list.
#[async_trait::async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Lists memories in insertion order.
    async fn list_memories(&self) -> Result<Vec<Memory>>;

    async fn add_memory(&self, content: &str) -> Result<Memory>;

    /// Removes a memory. Returns whether it existed.
    async fn delete_memory(&self, id: &str) -> Result<bool>;
}
