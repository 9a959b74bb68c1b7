//! Chat message types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Represents the author of a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Answer returned by the external chat API.
    Assistant,
}

impl MessageRole {
    /// Capitalized label used when rendering conversation history.
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::User => "User",
            MessageRole::Assistant => "Assistant",
        }
    }
}

/// A single message in a conversation or session.
///
/// Messages are immutable once created and kept in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl Message {
    /// Creates a message with a fresh UUID.
    pub fn new(role: MessageRole, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(content: impl Into<String>, timestamp: i64) -> Self {
        Self::new(MessageRole::User, content, timestamp)
    }

    pub fn assistant(content: impl Into<String>, timestamp: i64) -> Self {
        Self::new(MessageRole::Assistant, content, timestamp)
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = Message::user("hi", 1);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["timestamp"], 1);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(MessageRole::User.label(), "User");
        assert_eq!(MessageRole::Assistant.label(), "Assistant");
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
        assert_eq!(MessageRole::from_str("user").unwrap(), MessageRole::User);
    }

    #[test]
    fn test_new_messages_get_distinct_ids() {
        let a = Message::assistant("x", 0);
        let b = Message::assistant("x", 0);
        assert_ne!(a.id, b.id);
    }
}
