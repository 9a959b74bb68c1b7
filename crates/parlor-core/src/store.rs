//! Storage capabilities shared by every persistence variant.
//!
//! [`ChatStore`] is what a chat turn needs and is implemented by both the
//! durable JSON store and the ephemeral session store. Conversations,
//! projects, memories and backups are durable-only and live in their own
//! traits.

use serde::{Deserialize, Serialize};

use crate::conversation::Conversation;
use crate::error::Result;
use crate::memory::Memory;
use crate::message::Message;
use crate::project::Project;
use crate::settings::{ApiSettings, SettingsUpdate};

/// Everything the context builder needs from a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatThread {
    pub history: Vec<Message>,
    /// Instructions of the owning project, if any.
    pub instructions: Option<String>,
    pub memories: Vec<String>,
}

/// Chat capability set keyed by a thread id.
///
/// The thread id is a conversation id in the durable store and a session id
/// in the session store.
#[async_trait::async_trait]
pub trait ChatStore: Send + Sync {
    /// Settings that apply to `thread_id`.
    async fn settings(&self, thread_id: &str) -> Result<ApiSettings>;

    async fn update_settings(&self, thread_id: &str, update: SettingsUpdate)
    -> Result<ApiSettings>;

    /// History and context of a thread.
    async fn thread(&self, thread_id: &str) -> Result<ChatThread>;

    /// Appends a message under the message window rule. Fails with
    /// not-found for an unknown thread.
    async fn append_message(&self, thread_id: &str, message: Message) -> Result<()>;

    /// Fails with not-found for an unknown thread.
    async fn clear_messages(&self, thread_id: &str) -> Result<()>;
}

/// The whole durable document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    pub settings: ApiSettings,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub memories: Vec<Memory>,
}

impl AppData {
    /// An empty document with the given settings.
    pub fn with_settings(settings: ApiSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn conversation_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    /// Clears `project_id` on every conversation grouped under `project_id`.
    /// Returns the number of conversations touched.
    pub fn ungroup(&mut self, project_id: &str) -> usize {
        let mut count = 0;
        for conv in self
            .conversations
            .iter_mut()
            .filter(|c| c.project_id.as_deref() == Some(project_id))
        {
            conv.project_id = None;
            count += 1;
        }
        count
    }
}

/// Full dump and replace of the durable document.
#[async_trait::async_trait]
pub trait BackupRepository: Send + Sync {
    async fn export_all(&self) -> Result<AppData>;

    /// Replaces everything with `data` after validating it.
    async fn import_all(&self, data: AppData) -> Result<()>;
}
