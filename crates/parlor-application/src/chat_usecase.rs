//! Chat use case implementation.
//!
//! One chat turn: validate and sanitize the user message, store it, build
//! the contextual query, call the external API and store the answer.

use std::sync::Arc;

use parlor_core::clock::Clock;
use parlor_core::context::ContextBudget;
use parlor_core::gateway::ChatGateway;
use parlor_core::message::Message;
use parlor_core::sanitize::{is_valid_message, sanitize};
use parlor_core::store::ChatStore;
use parlor_core::{ParlorError, Result};
use serde::Serialize;

pub const MISSING_THREAD_ID: &str = "Missing conversationId.";
pub const INVALID_MESSAGE: &str = "Invalid message. Must be 1-2000 characters.";
pub const API_KEY_NOT_CONFIGURED: &str =
    "API key not configured. Open Settings to set your API key.";

/// Outcome of a successful chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub user_message: Message,
    pub assistant_message: Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_alias_id: Option<String>,
}

/// Use case for sending a message and receiving the upstream answer.
///
/// Works against any [`ChatStore`]: a conversation id with the durable
/// store, a session id with the session store.
pub struct ChatUseCase {
    store: Arc<dyn ChatStore>,
    gateway: Arc<dyn ChatGateway>,
    clock: Arc<dyn Clock>,
    budget: ContextBudget,
}

impl ChatUseCase {
    pub fn new(
        store: Arc<dyn ChatStore>,
        gateway: Arc<dyn ChatGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            gateway,
            clock,
            budget: ContextBudget::default(),
        }
    }

    pub fn with_budget(mut self, budget: ContextBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Runs one chat turn on `thread_id`.
    ///
    /// The user message is stored before the upstream call and stays stored
    /// if that call fails. No store lock is held while waiting upstream.
    #[tracing::instrument(skip(self, raw_message), fields(message_chars = raw_message.chars().count()))]
    pub async fn send_message(&self, thread_id: &str, raw_message: &str) -> Result<ChatReply> {
        if thread_id.trim().is_empty() {
            return Err(ParlorError::validation(MISSING_THREAD_ID));
        }
        if !is_valid_message(raw_message) {
            return Err(ParlorError::validation(INVALID_MESSAGE));
        }
        let content = sanitize(raw_message);
        // NUL-only input survives the length check but sanitizes to blank.
        if content.trim().is_empty() {
            return Err(ParlorError::validation(INVALID_MESSAGE));
        }

        let thread = self.store.thread(thread_id).await?;
        let settings = self.store.settings(thread_id).await?;
        if !settings.has_api_key() {
            return Err(ParlorError::validation(API_KEY_NOT_CONFIGURED));
        }

        let user_message = Message::user(content.clone(), self.clock.now_ms());
        self.store
            .append_message(thread_id, user_message.clone())
            .await?;

        let query = self.budget.build_query(
            &content,
            &thread.history,
            thread.instructions.as_deref(),
            &thread.memories,
        );
        tracing::debug!(
            history = thread.history.len(),
            memories = thread.memories.len(),
            query_chars = query.chars().count(),
            "Built contextual query"
        );

        let answer = match self.gateway.send(&query, &settings).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = %e, "Chat API call failed");
                return Err(e);
            }
        };

        let assistant_message = Message::assistant(answer.answer, self.clock.now_ms());
        self.store
            .append_message(thread_id, assistant_message.clone())
            .await?;

        Ok(ChatReply {
            user_message,
            assistant_message,
            flow_id: answer.flow_id,
            flow_alias_id: answer.flow_alias_id,
        })
    }

    /// Clears the history of `thread_id`.
    pub async fn clear_history(&self, thread_id: &str) -> Result<()> {
        if thread_id.trim().is_empty() {
            return Err(ParlorError::validation(MISSING_THREAD_ID));
        }
        self.store.clear_messages(thread_id).await
    }
}
