//! Conversation and project management use cases.

use std::sync::Arc;

use parlor_core::conversation::{
    Conversation, ConversationRepository, ConversationSummary, ConversationUpdate,
};
use parlor_core::project::{Project, ProjectRepository, ProjectUpdate};
use parlor_core::{ParlorError, Result};

pub const PROJECT_NAME_REQUIRED: &str = "Project name is required";
pub const TITLE_REQUIRED: &str = "Conversation title is required";

/// Use case for listing, creating and organizing conversations.
pub struct ConversationService {
    conversations: Arc<dyn ConversationRepository>,
}

impl ConversationService {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    pub async fn list(&self) -> Result<Vec<ConversationSummary>> {
        self.conversations.list_conversations().await
    }

    /// Returns the conversation or a not-found error.
    pub async fn get(&self, id: &str) -> Result<Conversation> {
        self.conversations
            .get_conversation(id)
            .await?
            .ok_or_else(|| ParlorError::not_found("conversation", id))
    }

    pub async fn create(&self, project_id: Option<String>) -> Result<Conversation> {
        self.conversations.create_conversation(project_id).await
    }

    pub async fn rename(&self, id: &str, title: &str) -> Result<Conversation> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ParlorError::validation(TITLE_REQUIRED));
        }
        self.update(id, ConversationUpdate::title(title)).await
    }

    /// Moves a conversation under a project, or ungroups it with `None`.
    pub async fn move_to_project(&self, id: &str, project_id: Option<String>) -> Result<Conversation> {
        self.update(id, ConversationUpdate::project(project_id)).await
    }

    async fn update(&self, id: &str, update: ConversationUpdate) -> Result<Conversation> {
        self.conversations
            .update_conversation(id, update)
            .await?
            .ok_or_else(|| ParlorError::not_found("conversation", id))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.conversations.delete_conversation(id).await? {
            Ok(())
        } else {
            Err(ParlorError::not_found("conversation", id))
        }
    }
}

/// Use case for project presets.
pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        self.projects.list_projects().await
    }

    pub async fn get(&self, id: &str) -> Result<Project> {
        self.projects
            .get_project(id)
            .await?
            .ok_or_else(|| ParlorError::not_found("project", id))
    }

    pub async fn create(&self, name: &str) -> Result<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ParlorError::validation(PROJECT_NAME_REQUIRED));
        }
        let project = self.projects.create_project(name).await?;
        tracing::info!(project_id = %project.id, "Created project");
        Ok(project)
    }

    /// Applies a partial update. A present name must not be blank.
    pub async fn update(&self, id: &str, mut update: ProjectUpdate) -> Result<Project> {
        if let Some(name) = update.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(ParlorError::validation(PROJECT_NAME_REQUIRED));
            }
        }
        self.projects
            .update_project(id, update)
            .await?
            .ok_or_else(|| ParlorError::not_found("project", id))
    }

    /// Deletes a project. Its conversations are kept and ungrouped.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.projects.delete_project(id).await? {
            Ok(())
        } else {
            Err(ParlorError::not_found("project", id))
        }
    }
}
