//! Backup export and import.
//!
//! Backups use the same JSON layout as the data file.

use std::sync::Arc;

use chrono::NaiveDate;
use parlor_core::store::{AppData, BackupRepository};
use parlor_core::{ParlorError, Result};

/// Suggested file name for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("chatbot-backup-{}.json", date.format("%Y-%m-%d"))
}

/// A serialized backup ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub file_name: String,
    pub contents: String,
}

pub struct BackupService {
    repository: Arc<dyn BackupRepository>,
}

impl BackupService {
    pub fn new(repository: Arc<dyn BackupRepository>) -> Self {
        Self { repository }
    }

    pub async fn export(&self) -> Result<AppData> {
        self.repository.export_all().await
    }

    /// Exports everything as pretty JSON named for `date`.
    pub async fn export_file(&self, date: NaiveDate) -> Result<BackupFile> {
        let data = self.repository.export_all().await?;
        Ok(BackupFile {
            file_name: backup_file_name(date),
            contents: serde_json::to_string_pretty(&data)?,
        })
    }

    /// Parses `json` as a full document and replaces all stored data with it.
    ///
    /// Nothing is replaced unless the document parses and passes the
    /// repository's checks.
    pub async fn import_json(&self, json: &str) -> Result<()> {
        let data: AppData = serde_json::from_str(json).map_err(|e| ParlorError::Serialization {
            format: "JSON".to_string(),
            message: format!("Invalid backup file: {}", e),
        })?;
        self.repository.import_all(data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_core::clock::ManualClock;
    use parlor_core::conversation::ConversationRepository;
    use parlor_core::settings::ApiSettings;
    use parlor_infrastructure::JsonFileStore;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> Arc<JsonFileStore> {
        Arc::new(JsonFileStore::in_dir(
            dir.path(),
            ApiSettings::default(),
            Arc::new(ManualClock::new(0)),
        ))
    }

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(backup_file_name(date), "chatbot-backup-2026-03-07.json");
    }

    #[tokio::test]
    async fn test_export_then_import_into_fresh_store() {
        let source_dir = TempDir::new().unwrap();
        let source = store(&source_dir);
        let conv = source.create_conversation(None).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let file = BackupService::new(source).export_file(date).await.unwrap();
        assert_eq!(file.file_name, "chatbot-backup-2026-01-02.json");

        let target_dir = TempDir::new().unwrap();
        let target = store(&target_dir);
        BackupService::new(target.clone())
            .import_json(&file.contents)
            .await
            .unwrap();
        assert!(target.get_conversation(&conv.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_document_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let target = store(&dir);
        let conv = target.create_conversation(None).await.unwrap();
        let service = BackupService::new(target.clone());

        let err = service.import_json("{\"projects\": 3}").await.unwrap_err();
        assert!(err.is_serialization());
        let err = service.import_json("not json").await.unwrap_err();
        assert!(err.is_serialization());

        assert!(target.get_conversation(&conv.id).await.unwrap().is_some());
    }
}
