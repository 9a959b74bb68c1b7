//! Conversation domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::{Message, MessageWindow};

/// Title every conversation starts with.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Number of characters of the first user message used as a title.
pub const AUTO_TITLE_CHARS: usize = 50;

/// A titled, ordered sequence of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    /// Project this conversation is grouped under, if any.
    #[serde(default)]
    pub project_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Conversation {
    /// Creates an empty conversation titled [`DEFAULT_TITLE`].
    pub fn new(project_id: Option<String>, now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            project_id,
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }

    /// Appends a message and applies the auto-title and window rules.
    ///
    /// The title is derived from a user message only while it is still the
    /// default, so it happens at most once.
    pub fn push_message(&mut self, message: Message, window: &MessageWindow, now: i64) {
        if message.is_user() && self.has_default_title() {
            self.title = auto_title(&message.content);
        }
        window.push(&mut self.messages, message);
        self.updated_at = now;
    }

    /// Clears the message list, keeping title and grouping.
    pub fn clear_messages(&mut self, now: i64) {
        self.messages.clear();
        self.updated_at = now;
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            project_id: self.project_id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing view of a conversation, without its messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub project_id: Option<String>,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Partial update of conversation metadata.
///
/// `project_id` is doubly optional: `None` leaves the grouping untouched,
/// `Some(None)` ungroups, `Some(Some(id))` moves the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationUpdate {
    pub title: Option<String>,
    pub project_id: Option<Option<String>>,
}

impl ConversationUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            project_id: None,
        }
    }

    pub fn project(project_id: Option<String>) -> Self {
        Self {
            title: None,
            project_id: Some(project_id),
        }
    }
}

/// Derives a title from message content: the first 50 characters, with an
/// ellipsis when anything was cut.
pub fn auto_title(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(AUTO_TITLE_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
