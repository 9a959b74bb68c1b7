//! In-memory doubles for the store and gateway traits.

use std::collections::HashMap;

use parlor_core::gateway::{ChatGateway, UpstreamAnswer};
use parlor_core::message::{Message, MessageWindow};
use parlor_core::settings::{ApiSettings, SettingsUpdate};
use parlor_core::store::{ChatStore, ChatThread};
use parlor_core::{ParlorError, Result};
use tokio::sync::Mutex;

#[derive(Default)]
struct MockThread {
    settings: ApiSettings,
    messages: Vec<Message>,
    instructions: Option<String>,
    memories: Vec<String>,
}

/// A [`ChatStore`] holding threads in a map. Unknown ids are not-found.
#[derive(Default)]
pub struct MockChatStore {
    threads: Mutex<HashMap<String, MockThread>>,
}

impl MockChatStore {
    pub fn with_thread(id: &str, settings: ApiSettings) -> Self {
        let mut threads = HashMap::new();
        threads.insert(
            id.to_string(),
            MockThread {
                settings,
                ..MockThread::default()
            },
        );
        Self {
            threads: Mutex::new(threads),
        }
    }

    pub async fn set_context(&self, id: &str, instructions: Option<&str>, memories: &[&str]) {
        if let Some(thread) = self.threads.lock().await.get_mut(id) {
            thread.instructions = instructions.map(str::to_string);
            thread.memories = memories.iter().map(|m| m.to_string()).collect();
        }
    }

    pub async fn history(&self, id: &str) -> Vec<Message> {
        self.threads
            .lock()
            .await
            .get(id)
            .map(|t| t.messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ChatStore for MockChatStore {
    async fn settings(&self, thread_id: &str) -> Result<ApiSettings> {
        self.threads
            .lock()
            .await
            .get(thread_id)
            .map(|t| t.settings.clone())
            .ok_or_else(|| ParlorError::not_found("thread", thread_id))
    }

    async fn update_settings(&self, thread_id: &str, update: SettingsUpdate) -> Result<ApiSettings> {
        let mut threads = self.threads.lock().await;
        let thread = threads
            .get_mut(thread_id)
            .ok_or_else(|| ParlorError::not_found("thread", thread_id))?;
        thread.settings.apply(&update);
        Ok(thread.settings.clone())
    }

    async fn thread(&self, thread_id: &str) -> Result<ChatThread> {
        let threads = self.threads.lock().await;
        let thread = threads
            .get(thread_id)
            .ok_or_else(|| ParlorError::not_found("thread", thread_id))?;
        Ok(ChatThread {
            history: thread.messages.clone(),
            instructions: thread.instructions.clone(),
            memories: thread.memories.clone(),
        })
    }

    async fn append_message(&self, thread_id: &str, message: Message) -> Result<()> {
        let mut threads = self.threads.lock().await;
        let thread = threads
            .get_mut(thread_id)
            .ok_or_else(|| ParlorError::not_found("thread", thread_id))?;
        MessageWindow::default().push(&mut thread.messages, message);
        Ok(())
    }

    async fn clear_messages(&self, thread_id: &str) -> Result<()> {
        let mut threads = self.threads.lock().await;
        let thread = threads
            .get_mut(thread_id)
            .ok_or_else(|| ParlorError::not_found("thread", thread_id))?;
        thread.messages.clear();
        Ok(())
    }
}

/// A [`ChatGateway`] that records queries and replays a fixed outcome.
pub struct MockGateway {
    outcome: std::result::Result<String, ParlorError>,
    queries: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn answering(answer: &str) -> Self {
        Self {
            outcome: Ok(answer.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ParlorError) -> Self {
        Self {
            outcome: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl ChatGateway for MockGateway {
    async fn send(&self, query: &str, _settings: &ApiSettings) -> Result<UpstreamAnswer> {
        self.queries.lock().await.push(query.to_string());
        self.outcome.clone().map(|answer| UpstreamAnswer {
            answer,
            flow_id: None,
            flow_alias_id: None,
        })
    }
}
