//! Memory management use case.

use std::sync::Arc;

use parlor_core::memory::{MAX_MEMORY_CHARS, Memory, MemoryRepository};
use parlor_core::{ParlorError, Result};

pub const MEMORY_REQUIRED: &str = "Memory content is required";
pub const MEMORY_TOO_LONG: &str = "Memory must be 500 characters or less";

pub struct MemoryService {
    memories: Arc<dyn MemoryRepository>,
}

impl MemoryService {
    pub fn new(memories: Arc<dyn MemoryRepository>) -> Self {
        Self { memories }
    }

    pub async fn list(&self) -> Result<Vec<Memory>> {
        self.memories.list_memories().await
    }

    /// Adds a memory. Content is trimmed and must be 1-500 characters.
    pub async fn add(&self, content: &str) -> Result<Memory> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ParlorError::validation(MEMORY_REQUIRED));
        }
        if content.chars().count() > MAX_MEMORY_CHARS {
            return Err(ParlorError::validation(MEMORY_TOO_LONG));
        }
        self.memories.add_memory(content).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.memories.delete_memory(id).await? {
            Ok(())
        } else {
            Err(ParlorError::not_found("memory", id))
        }
    }
}
