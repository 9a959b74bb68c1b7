//! Project domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named instruction preset shared by the conversations grouped under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Free-form instructions prepended to every query of a grouped conversation.
    #[serde(default)]
    pub instructions: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Project {
    /// Creates a project with empty instructions.
    pub fn new(name: impl Into<String>, now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            instructions: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ProjectUpdate, now: i64) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(instructions) = update.instructions {
            self.instructions = instructions;
        }
        self.updated_at = now;
    }
}

/// Partial project update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_has_empty_instructions() {
        let project = Project::new("Research", 7);
        assert_eq!(project.name, "Research");
        assert!(project.instructions.is_empty());
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_apply_bumps_updated_at() {
        let mut project = Project::new("Research", 1);
        project.apply(
            ProjectUpdate {
                instructions: Some("Answer in French.".to_string()),
                ..ProjectUpdate::default()
            },
            9,
        );
        assert_eq!(project.name, "Research");
        assert_eq!(project.instructions, "Answer in French.");
        assert_eq!(project.updated_at, 9);
        assert_eq!(project.created_at, 1);
    }
}
