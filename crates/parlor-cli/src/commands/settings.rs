use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use parlor_core::config::StorageMode;
use parlor_core::settings::{MaskedSettings, SettingsUpdate};

use crate::bootstrap::AppContext;

/// Thread id used for settings in file mode, where settings are global.
const GLOBAL_SETTINGS: &str = "global";

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the current settings (API key masked)
    Show,
    /// Change one or more settings
    Set {
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        user_context: Option<String>,
    },
}

pub fn print_settings(settings: &MaskedSettings) {
    println!("{:<13} {}", "API URL".bold(), settings.api_url);
    let key = if settings.api_key.is_empty() {
        "(not set)".bright_black().to_string()
    } else {
        settings.api_key.clone()
    };
    println!("{:<13} {}", "API key".bold(), key);
    println!("{:<13} {}", "Platform".bold(), settings.platform);
    println!("{:<13} {}", "User context".bold(), settings.user_context);
}

pub async fn run(app: &AppContext, action: SettingsAction) -> Result<()> {
    if app.mode == StorageMode::Session {
        println!(
            "{}",
            "Session mode: settings live only inside a REPL session. Showing defaults.".yellow()
        );
    }

    match action {
        SettingsAction::Show => {
            print_settings(&app.settings.get(GLOBAL_SETTINGS).await?);
        }
        SettingsAction::Set {
            api_url,
            api_key,
            platform,
            user_context,
        } => {
            app.durable()?;
            let update = SettingsUpdate {
                api_url,
                api_key,
                platform,
                user_context,
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to update. Pass at least one of --api-url, --api-key, --platform, --user-context.");
            }
            print_settings(&app.settings.update(GLOBAL_SETTINGS, update).await?);
        }
    }
    Ok(())
}
