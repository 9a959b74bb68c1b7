//! Durable chat store backed by a single JSON document.
//!
//! The document is loaded lazily on first access and kept in memory. Every
//! mutation is applied to a copy, written atomically, and only then becomes
//! the cached state, so a failed write leaves both disk and cache untouched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parlor_core::clock::Clock;
use parlor_core::conversation::{
    Conversation, ConversationRepository, ConversationSummary, ConversationUpdate,
};
use parlor_core::memory::{Memory, MemoryRepository};
use parlor_core::message::{Message, MessageWindow};
use parlor_core::project::{Project, ProjectRepository, ProjectUpdate};
use parlor_core::settings::{ApiSettings, SettingsUpdate};
use parlor_core::store::{AppData, BackupRepository, ChatStore, ChatThread};
use parlor_core::{ParlorError, Result};
use tokio::sync::Mutex;

use crate::paths::ParlorPaths;
use crate::storage::AtomicJsonFile;

/// Durable chat store: conversations, projects, memories and global
/// settings in one pretty-printed JSON file.
///
/// All operations on one instance are serialized by an async mutex. Nothing
/// guards against a second process writing the same file.
pub struct JsonFileStore {
    file: AtomicJsonFile<AppData>,
    defaults: ApiSettings,
    clock: Arc<dyn Clock>,
    window: MessageWindow,
    cache: Mutex<Option<AppData>>,
}

impl JsonFileStore {
    /// Creates a store for the document at `path`.
    ///
    /// `defaults` seeds the settings of a freshly created document.
    pub fn new(path: PathBuf, defaults: ApiSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            defaults,
            clock,
            window: MessageWindow::default(),
            cache: Mutex::new(None),
        }
    }

    /// Creates a store for `chatbot-data.json` inside `data_dir`.
    pub fn in_dir(data_dir: &Path, defaults: ApiSettings, clock: Arc<dyn Clock>) -> Self {
        Self::new(ParlorPaths::data_file(data_dir), defaults, clock)
    }

    pub fn with_window(mut self, window: MessageWindow) -> Self {
        self.window = window;
        self
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn loaded<'a>(&self, slot: &'a mut Option<AppData>) -> Result<&'a mut AppData> {
        if slot.is_none() {
            let data = match self.file.load().await? {
                Some(data) => {
                    tracing::debug!(
                        path = %self.file.path().display(),
                        conversations = data.conversations.len(),
                        projects = data.projects.len(),
                        "Loaded chat data"
                    );
                    data
                }
                None => {
                    let data = AppData::with_settings(self.defaults.clone());
                    self.file.save(&data).await?;
                    tracing::info!(path = %self.file.path().display(), "Initialized chat data file");
                    data
                }
            };
            *slot = Some(data);
        }
        slot.as_mut()
            .ok_or_else(|| ParlorError::internal("chat data cache is empty after load"))
    }

    async fn read<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&AppData) -> R + Send,
    {
        let mut guard = self.cache.lock().await;
        let data = self.loaded(&mut guard).await?;
        Ok(f(data))
    }

    /// Runs `f` on a copy of the document and persists the copy if it changed.
    async fn mutate<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut AppData) -> Result<R> + Send,
        R: Send,
    {
        let mut guard = self.cache.lock().await;
        let current = self.loaded(&mut guard).await?;

        let mut next = current.clone();
        let value = f(&mut next)?;
        if next != *current {
            self.file.save(&next).await?;
            *current = next;
        }
        Ok(value)
    }
}

fn ensure_project(data: &AppData, project_id: Option<&str>) -> Result<()> {
    match project_id {
        Some(id) if data.project(id).is_none() => Err(ParlorError::not_found("project", id)),
        _ => Ok(()),
    }
}

/// Checks an imported document and repairs what can be repaired.
///
/// Duplicate ids are rejected. Dangling project references are cleared and
/// over-long histories are cut down by the message window.
fn validate_import(data: &mut AppData, window: &MessageWindow) -> Result<()> {
    fn unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(ParlorError::validation(format!(
                    "Duplicate {} id in backup: {}",
                    kind, id
                )));
            }
        }
        Ok(())
    }

    unique("project", data.projects.iter().map(|p| p.id.as_str()))?;
    unique("conversation", data.conversations.iter().map(|c| c.id.as_str()))?;
    unique("memory", data.memories.iter().map(|m| m.id.as_str()))?;

    let project_ids: HashSet<String> = data.projects.iter().map(|p| p.id.clone()).collect();
    for conv in &mut data.conversations {
        if conv
            .project_id
            .as_ref()
            .is_some_and(|id| !project_ids.contains(id))
        {
            conv.project_id = None;
        }
        window.enforce(&mut conv.messages);
    }
    Ok(())
}

#[async_trait::async_trait]
impl ChatStore for JsonFileStore {
    async fn settings(&self, _thread_id: &str) -> Result<ApiSettings> {
        self.read(|data| data.settings.clone()).await
    }

    async fn update_settings(
        &self,
        _thread_id: &str,
        update: SettingsUpdate,
    ) -> Result<ApiSettings> {
        self.mutate(|data| {
            data.settings.apply(&update);
            Ok(data.settings.clone())
        })
        .await
    }

    async fn thread(&self, thread_id: &str) -> Result<ChatThread> {
        self.read(|data| {
            let conv = data
                .conversation(thread_id)
                .ok_or_else(|| ParlorError::not_found("conversation", thread_id))?;
            let instructions = conv
                .project_id
                .as_deref()
                .and_then(|id| data.project(id))
                .map(|p| p.instructions.clone());
            Ok(ChatThread {
                history: conv.messages.clone(),
                instructions,
                memories: data.memories.iter().map(|m| m.content.clone()).collect(),
            })
        })
        .await?
    }

    async fn append_message(&self, thread_id: &str, message: Message) -> Result<()> {
        self.add_message(thread_id, message).await.map(|_| ())
    }

    async fn clear_messages(&self, thread_id: &str) -> Result<()> {
        let now = self.clock.now_ms();
        self.mutate(|data| {
            let conv = data
                .conversation_mut(thread_id)
                .ok_or_else(|| ParlorError::not_found("conversation", thread_id))?;
            conv.clear_messages(now);
            Ok(())
        })
        .await
    }
}

#[async_trait::async_trait]
impl ConversationRepository for JsonFileStore {
    async fn create_conversation(&self, project_id: Option<String>) -> Result<Conversation> {
        let now = self.clock.now_ms();
        let conv = self
            .mutate(|data| {
                ensure_project(data, project_id.as_deref())?;
                let conv = Conversation::new(project_id, now);
                data.conversations.push(conv.clone());
                Ok(conv)
            })
            .await?;
        tracing::debug!(conversation_id = %conv.id, "Created conversation");
        Ok(conv)
    }

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>> {
        self.read(|data| data.conversation(id).cloned()).await
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        self.read(|data| {
            let mut summaries: Vec<ConversationSummary> =
                data.conversations.iter().map(Conversation::summary).collect();
            summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            summaries
        })
        .await
    }

    async fn add_message(&self, id: &str, message: Message) -> Result<Conversation> {
        let now = self.clock.now_ms();
        let window = self.window;
        self.mutate(|data| {
            let conv = data
                .conversation_mut(id)
                .ok_or_else(|| ParlorError::not_found("conversation", id))?;
            conv.push_message(message, &window, now);
            Ok(conv.clone())
        })
        .await
    }

    async fn update_conversation(
        &self,
        id: &str,
        update: ConversationUpdate,
    ) -> Result<Option<Conversation>> {
        let now = self.clock.now_ms();
        self.mutate(|data| {
            if data.conversation(id).is_none() {
                return Ok(None);
            }
            if let Some(project_id) = &update.project_id {
                ensure_project(data, project_id.as_deref())?;
            }
            let Some(conv) = data.conversation_mut(id) else {
                return Ok(None);
            };
            if let Some(title) = update.title {
                conv.title = title;
            }
            if let Some(project_id) = update.project_id {
                conv.project_id = project_id;
            }
            conv.updated_at = now;
            Ok(Some(conv.clone()))
        })
        .await
    }

    async fn delete_conversation(&self, id: &str) -> Result<bool> {
        self.mutate(|data| {
            let before = data.conversations.len();
            data.conversations.retain(|c| c.id != id);
            Ok(data.conversations.len() != before)
        })
        .await
    }
}

#[async_trait::async_trait]
impl ProjectRepository for JsonFileStore {
    async fn create_project(&self, name: &str) -> Result<Project> {
        let now = self.clock.now_ms();
        self.mutate(|data| {
            let project = Project::new(name, now);
            data.projects.push(project.clone());
            Ok(project)
        })
        .await
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>> {
        self.read(|data| data.project(id).cloned()).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.read(|data| {
            let mut projects = data.projects.clone();
            projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            projects
        })
        .await
    }

    async fn update_project(&self, id: &str, update: ProjectUpdate) -> Result<Option<Project>> {
        let now = self.clock.now_ms();
        self.mutate(|data| {
            Ok(data.projects.iter_mut().find(|p| p.id == id).map(|project| {
                project.apply(update, now);
                project.clone()
            }))
        })
        .await
    }

    async fn delete_project(&self, id: &str) -> Result<bool> {
        let ungrouped = self
            .mutate(|data| {
                let before = data.projects.len();
                data.projects.retain(|p| p.id != id);
                if data.projects.len() == before {
                    return Ok(None);
                }
                Ok(Some(data.ungroup(id)))
            })
            .await?;

        match ungrouped {
            Some(count) => {
                tracing::info!(project_id = %id, ungrouped = count, "Deleted project");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn project_instructions(&self, id: &str) -> Result<String> {
        self.read(|data| {
            data.project(id)
                .map(|p| p.instructions.clone())
                .unwrap_or_default()
        })
        .await
    }
}

#[async_trait::async_trait]
impl MemoryRepository for JsonFileStore {
    async fn list_memories(&self) -> Result<Vec<Memory>> {
        self.read(|data| data.memories.clone()).await
    }

    async fn add_memory(&self, content: &str) -> Result<Memory> {
        let now = self.clock.now_ms();
        self.mutate(|data| {
            let memory = Memory::new(content, now);
            data.memories.push(memory.clone());
            Ok(memory)
        })
        .await
    }

    async fn delete_memory(&self, id: &str) -> Result<bool> {
        self.mutate(|data| {
            let before = data.memories.len();
            data.memories.retain(|m| m.id != id);
            Ok(data.memories.len() != before)
        })
        .await
    }
}

#[async_trait::async_trait]
impl BackupRepository for JsonFileStore {
    async fn export_all(&self) -> Result<AppData> {
        self.read(|data| data.clone()).await
    }

    async fn import_all(&self, mut data: AppData) -> Result<()> {
        validate_import(&mut data, &self.window)?;
        let counts = (data.conversations.len(), data.projects.len(), data.memories.len());
        self.mutate(move |current| {
            *current = data;
            Ok(())
        })
        .await?;
        tracing::info!(
            conversations = counts.0,
            projects = counts.1,
            memories = counts.2,
            "Imported backup"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::clock::ManualClock;
    use parlor_core::conversation::DEFAULT_TITLE;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        clock: Arc<ManualClock>,
        store: JsonFileStore,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(1_000));
        let store = JsonFileStore::in_dir(dir.path(), ApiSettings::default(), clock.clone());
        Fixture {
            _dir: dir,
            clock,
            store,
        }
    }

    #[tokio::test]
    async fn test_first_access_creates_file_with_defaults() {
        let fx = fixture();
        assert!(!fx.store.path().exists());

        let settings = fx.store.settings("any").await.unwrap();
        assert_eq!(settings, ApiSettings::default());
        assert!(fx.store.path().exists());

        let raw = std::fs::read_to_string(fx.store.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["conversations"], serde_json::json!([]));
        assert_eq!(doc["settings"]["platform"], "adhoc");
    }

    #[tokio::test]
    async fn test_conversation_lifecycle() {
        let fx = fixture();
        let conv = fx.store.create_conversation(None).await.unwrap();
        assert_eq!(conv.title, DEFAULT_TITLE);
        assert_eq!(conv.created_at, 1_000);

        fx.clock.advance(5);
        let updated = fx
            .store
            .add_message(&conv.id, Message::user("How do lifetimes work?", 1_005))
            .await
            .unwrap();
        assert_eq!(updated.title, "How do lifetimes work?");
        assert_eq!(updated.updated_at, 1_005);

        fx.clock.advance(5);
        let renamed = fx
            .store
            .update_conversation(&conv.id, ConversationUpdate::title("Lifetimes"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.title, "Lifetimes");
        assert_eq!(renamed.updated_at, 1_010);
        assert_eq!(renamed.messages.len(), 1);

        assert!(fx.store.delete_conversation(&conv.id).await.unwrap());
        assert!(!fx.store.delete_conversation(&conv.id).await.unwrap());
        assert!(fx.store.get_conversation(&conv.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_conversations_sorted_by_update() {
        let fx = fixture();
        let first = fx.store.create_conversation(None).await.unwrap();
        fx.clock.advance(10);
        let second = fx.store.create_conversation(None).await.unwrap();
        fx.clock.advance(10);
        fx.store
            .add_message(&first.id, Message::user("bump", 0))
            .await
            .unwrap();

        let ids: Vec<String> = fx
            .store
            .list_conversations()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let fx = fixture();
        let err = fx
            .store
            .add_message("missing", Message::user("hi", 0))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        assert!(
            fx.store
                .update_conversation("missing", ConversationUpdate::title("x"))
                .await
                .unwrap()
                .is_none()
        );
        // An unknown conversation wins over an unknown project.
        assert!(
            fx.store
                .update_conversation(
                    "missing",
                    ConversationUpdate::project(Some("ghost".to_string()))
                )
                .await
                .unwrap()
                .is_none()
        );
        assert!(fx.store.thread("missing").await.unwrap_err().is_not_found());
        assert!(
            fx.store
                .update_project("missing", ProjectUpdate::default())
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(fx.store.project_instructions("missing").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_project_reference_must_exist() {
        let fx = fixture();
        let err = fx
            .store
            .create_conversation(Some("ghost".to_string()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let conv = fx.store.create_conversation(None).await.unwrap();
        let err = fx
            .store
            .update_conversation(&conv.id, ConversationUpdate::project(Some("ghost".to_string())))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let project = fx.store.create_project("Work").await.unwrap();
        let moved = fx
            .store
            .update_conversation(&conv.id, ConversationUpdate::project(Some(project.id.clone())))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.project_id, Some(project.id));
    }

    #[tokio::test]
    async fn test_append_over_capacity_keeps_head() {
        let fx = fixture();
        let conv = fx.store.create_conversation(None).await.unwrap();
        for i in 1..=100 {
            fx.store
                .add_message(&conv.id, Message::user(format!("m{}", i), i))
                .await
                .unwrap();
        }
        let before = fx.store.get_conversation(&conv.id).await.unwrap().unwrap();

        let after = fx
            .store
            .add_message(&conv.id, Message::user("m101", 101))
            .await
            .unwrap();

        assert_eq!(after.messages.len(), 100);
        assert_eq!(after.messages[0], before.messages[0]);
        assert_eq!(&after.messages[1..99], &before.messages[2..100]);
        assert_eq!(after.messages[99].content, "m101");
    }

    #[tokio::test]
    async fn test_delete_project_ungroups_conversations() {
        let fx = fixture();
        let project = fx.store.create_project("Trips").await.unwrap();
        let other = fx.store.create_project("Other").await.unwrap();

        let mut grouped = Vec::new();
        for _ in 0..3 {
            grouped.push(
                fx.store
                    .create_conversation(Some(project.id.clone()))
                    .await
                    .unwrap(),
            );
        }
        let untouched = fx
            .store
            .create_conversation(Some(other.id.clone()))
            .await
            .unwrap();

        fx.clock.advance(100);
        assert!(fx.store.delete_project(&project.id).await.unwrap());
        assert!(!fx.store.delete_project(&project.id).await.unwrap());

        for conv in grouped {
            let reloaded = fx.store.get_conversation(&conv.id).await.unwrap().unwrap();
            assert_eq!(reloaded.project_id, None);
            assert_eq!(reloaded.title, conv.title);
            assert_eq!(reloaded.updated_at, conv.updated_at);
            assert_eq!(reloaded.messages, conv.messages);
        }
        let reloaded = fx.store.get_conversation(&untouched.id).await.unwrap().unwrap();
        assert_eq!(reloaded.project_id, Some(other.id));

        let projects = fx.store.list_projects().await.unwrap();
        assert!(projects.iter().all(|p| p.id != project.id));
    }

    #[tokio::test]
    async fn test_thread_includes_instructions_and_memories() {
        let fx = fixture();
        let project = fx.store.create_project("Style").await.unwrap();
        fx.store
            .update_project(
                &project.id,
                ProjectUpdate {
                    instructions: Some("Answer briefly.".to_string()),
                    ..ProjectUpdate::default()
                },
            )
            .await
            .unwrap();
        fx.store.add_memory("Prefers metric units").await.unwrap();
        let conv = fx
            .store
            .create_conversation(Some(project.id.clone()))
            .await
            .unwrap();
        fx.store
            .append_message(&conv.id, Message::user("hello", 0))
            .await
            .unwrap();

        let thread = fx.store.thread(&conv.id).await.unwrap();
        assert_eq!(thread.history.len(), 1);
        assert_eq!(thread.instructions.as_deref(), Some("Answer briefly."));
        assert_eq!(thread.memories, vec!["Prefers metric units".to_string()]);

        fx.store.clear_messages(&conv.id).await.unwrap();
        assert!(fx.store.thread(&conv.id).await.unwrap().history.is_empty());
    }

    #[tokio::test]
    async fn test_memories() {
        let fx = fixture();
        let a = fx.store.add_memory("first").await.unwrap();
        let b = fx.store.add_memory(&"x".repeat(700)).await.unwrap();
        assert_eq!(b.content.chars().count(), 500);

        let listed = fx.store.list_memories().await.unwrap();
        assert_eq!(listed, vec![a.clone(), b]);

        assert!(fx.store.delete_memory(&a.id).await.unwrap());
        assert!(!fx.store.delete_memory(&a.id).await.unwrap());
        assert_eq!(fx.store.list_memories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_settings_persist() {
        let fx = fixture();
        let updated = fx
            .store
            .update_settings(
                "ignored",
                SettingsUpdate {
                    api_key: Some("key-1234".to_string()),
                    ..SettingsUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.api_key, "key-1234");
        assert_eq!(fx.store.settings("other").await.unwrap().api_key, "key-1234");
    }

    #[tokio::test]
    async fn test_survives_restart() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(0));
        let conv_id = {
            let store = JsonFileStore::in_dir(dir.path(), ApiSettings::default(), clock.clone());
            let conv = store.create_conversation(None).await.unwrap();
            store
                .add_message(&conv.id, Message::user("persist me", 0))
                .await
                .unwrap();
            conv.id
        };

        let reopened = JsonFileStore::in_dir(dir.path(), ApiSettings::default(), clock);
        let conv = reopened.get_conversation(&conv_id).await.unwrap().unwrap();
        assert_eq!(conv.messages[0].content, "persist me");
    }

    #[tokio::test]
    async fn test_import_replaces_and_repairs() {
        let fx = fixture();
        fx.store.create_project("old").await.unwrap();

        let mut backup = AppData::default();
        backup.projects.push(Project::new("kept", 0));
        let mut dangling = Conversation::new(Some("removed-project".to_string()), 0);
        dangling.messages.push(Message::user("hi", 0));
        backup.conversations.push(dangling.clone());

        fx.store.import_all(backup).await.unwrap();

        let exported = fx.store.export_all().await.unwrap();
        assert_eq!(exported.projects.len(), 1);
        assert_eq!(exported.projects[0].name, "kept");
        assert_eq!(exported.conversations[0].id, dangling.id);
        assert_eq!(exported.conversations[0].project_id, None);
    }

    #[tokio::test]
    async fn test_import_rejects_duplicate_ids() {
        let fx = fixture();
        let conv = fx.store.create_conversation(None).await.unwrap();

        let mut backup = AppData::default();
        let dup = Conversation::new(None, 0);
        backup.conversations.push(dup.clone());
        backup.conversations.push(dup);

        let err = fx.store.import_all(backup).await.unwrap_err();
        assert!(err.is_validation());
        // Existing data is untouched.
        assert!(fx.store.get_conversation(&conv.id).await.unwrap().is_some());
    }
}
