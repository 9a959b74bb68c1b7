//! Conversation repository trait.

use super::model::{Conversation, ConversationSummary, ConversationUpdate};
use crate::error::Result;
use crate::message::Message;

/// An abstract repository for durable conversations.
///
/// Implementations must reject a `project_id` that does not reference an
/// existing project at write time with a not-found error.
#[async_trait::async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Creates an empty conversation, optionally grouped under a project.
    async fn create_conversation(&self, project_id: Option<String>) -> Result<Conversation>;

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>>;

    /// Lists conversations without messages, most recently updated first.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>>;

    /// Appends a message, applying the auto-title and window rules.
    ///
    /// # Returns
    ///
    /// - `Ok(Conversation)`: The conversation after the append
    /// - `Err(ParlorError::NotFound)`: No conversation with `id`
    async fn add_message(&self, id: &str, message: Message) -> Result<Conversation>;

    /// Applies a partial metadata update. `Ok(None)` when `id` is unknown.
    async fn update_conversation(
        &self,
        id: &str,
        update: ConversationUpdate,
    ) -> Result<Option<Conversation>>;

    /// Removes a conversation. Returns whether it existed.
    async fn delete_conversation(&self, id: &str) -> Result<bool>;
}
