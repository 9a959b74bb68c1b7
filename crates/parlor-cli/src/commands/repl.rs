//! Interactive chat loop.
//!
//! In file mode the loop runs on a durable conversation; in session mode it
//! runs on a fresh in-memory session that disappears on exit.

use anyhow::{Result, anyhow};
use colored::Colorize;
use parlor_core::config::StorageMode;
use parlor_core::settings::SettingsUpdate;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::settings::print_settings;
use super::{chat_failure, print_message};
use crate::bootstrap::AppContext;

const HELP: &str = "Commands: /clear  /settings  /key <api-key>  /help  /quit";

/// Resolves the thread the loop talks to.
async fn open_thread(app: &AppContext, conversation: Option<String>) -> Result<String> {
    match app.mode {
        StorageMode::File => {
            let conversations = &app.durable()?.conversations;
            match conversation {
                Some(id) => {
                    let existing = conversations.get(&id).await?;
                    println!("{} {}", "Resuming".bright_black(), existing.title.bold());
                    for message in &existing.messages {
                        print_message(message);
                    }
                    Ok(existing.id)
                }
                None => {
                    let created = conversations.create(None).await?;
                    println!("{} {}", "New conversation".bright_black(), created.id);
                    Ok(created.id)
                }
            }
        }
        StorageMode::Session => {
            let sessions = app
                .sessions
                .as_ref()
                .ok_or_else(|| anyhow!("Session store is not configured"))?;
            let resolved = sessions.resolve(None).await?;
            println!("{} {}", "Session".bright_black(), resolved.session_id);
            Ok(resolved.session_id)
        }
    }
}

pub async fn run(app: &AppContext, conversation: Option<String>) -> Result<()> {
    let thread_id = open_thread(app, conversation).await?;
    let mut rl = DefaultEditor::new()?;

    println!("{}", "=== Parlor ===".bright_magenta().bold());
    println!("{}", HELP.bright_black());
    println!();

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        match trimmed {
            "/quit" | "/exit" | "quit" | "exit" => break,
            "/help" => println!("{}", HELP.bright_black()),
            "/clear" => {
                app.chat.clear_history(&thread_id).await?;
                println!("{}", "History cleared".green());
            }
            "/settings" => print_settings(&app.settings.get(&thread_id).await?),
            _ if trimmed.starts_with("/key ") => {
                let update = SettingsUpdate {
                    api_key: Some(trimmed["/key ".len()..].to_string()),
                    ..SettingsUpdate::default()
                };
                match app.settings.update(&thread_id, update).await {
                    Ok(settings) => println!("{} {}", "API key set".green(), settings.api_key),
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
            _ => match app.chat.send_message(&thread_id, &line).await {
                Ok(reply) => print_message(&reply.assistant_message),
                Err(e) => eprintln!("{}", chat_failure(e).to_string().red()),
            },
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}
