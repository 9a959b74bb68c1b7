use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write all data to a JSON file (default: ./chatbot-backup-YYYY-MM-DD.json)
    Export { path: Option<PathBuf> },
    /// Replace all data with the contents of a backup file
    Import { path: PathBuf },
}

pub async fn run(app: &AppContext, action: BackupAction) -> Result<()> {
    let backup = &app.durable()?.backup;

    match action {
        BackupAction::Export { path } => {
            let file = backup.export_file(chrono::Local::now().date_naive()).await?;
            let path = path.unwrap_or_else(|| PathBuf::from(&file.file_name));
            fs::write(&path, file.contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Exported backup to".green(), path.display());
        }
        BackupAction::Import { path } => {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            backup.import_json(&contents).await?;
            println!("{} {}", "Imported backup from".green(), path.display());
        }
    }
    Ok(())
}
