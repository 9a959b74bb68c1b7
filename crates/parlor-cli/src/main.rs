use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parlor_core::config::StorageMode;
use parlor_infrastructure::ConfigService;

mod bootstrap;
mod commands;
mod logging;

use commands::backup::BackupAction;
use commands::conversations::ConversationAction;
use commands::memories::MemoryAction;
use commands::projects::ProjectAction;
use commands::settings::SettingsAction;

#[derive(Parser)]
#[command(name = "parlor")]
#[command(about = "Parlor - chat with a third-party conversational API", long_about = None)]
struct Cli {
    /// Path to config.toml (default: <config dir>/parlor/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend: "file" (durable JSON) or "session" (in-memory)
    #[arg(long, global = true)]
    storage: Option<StorageMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message to a conversation and print the answer
    Chat {
        conversation_id: String,
        message: String,
    },
    /// Chat interactively
    Repl {
        /// Resume an existing conversation (file mode only)
        #[arg(long)]
        conversation: Option<String>,
    },
    /// Manage conversations
    Conversations {
        #[command(subcommand)]
        action: ConversationAction,
    },
    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Manage memories injected into every query
    Memories {
        #[command(subcommand)]
        action: MemoryAction,
    },
    /// Show or change API settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Export or import all data
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::new(path),
        None => ConfigService::at_default_location()?,
    };
    let mut config = config_service.load().with_context(|| {
        format!(
            "Failed to load configuration from {}",
            config_service.path().display()
        )
    })?;
    if let Some(mode) = cli.storage {
        config.storage.mode = mode;
    }

    let _log_guard = logging::init(&config.logging)?;
    tracing::debug!(storage = %config.storage.mode, environment = %config.environment, "Starting parlor");

    let app = bootstrap::bootstrap(&config);

    match cli.command {
        Commands::Chat {
            conversation_id,
            message,
        } => commands::chat::run(&app, &conversation_id, &message).await?,
        Commands::Repl { conversation } => commands::repl::run(&app, conversation).await?,
        Commands::Conversations { action } => commands::conversations::run(&app, action).await?,
        Commands::Projects { action } => commands::projects::run(&app, action).await?,
        Commands::Memories { action } => commands::memories::run(&app, action).await?,
        Commands::Settings { action } => commands::settings::run(&app, action).await?,
        Commands::Backup { action } => commands::backup::run(&app, action).await?,
    }

    Ok(())
}
