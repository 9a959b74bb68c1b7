//! Project repository trait.

use super::model::{Project, ProjectUpdate};
use crate::error::Result;

/// An abstract repository for projects.
#[async_trait::async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create_project(&self, name: &str) -> Result<Project>;

    async fn get_project(&self, id: &str) -> Result<Option<Project>>;

    /// Lists projects, most recently updated first.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Applies a partial update. `Ok(None)` when `id` is unknown.
    async fn update_project(&self, id: &str, update: ProjectUpdate) -> Result<Option<Project>>;

    /// Removes a project and ungroups its conversations in the same write.
    ///
    /// Returns whether the project existed.
    async fn delete_project(&self, id: &str) -> Result<bool>;

    /// Instructions of a project, or an empty string when it is unknown.
    async fn project_instructions(&self, id: &str) -> Result<String>;
}
