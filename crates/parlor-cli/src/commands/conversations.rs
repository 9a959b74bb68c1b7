use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{format_timestamp, print_message};
use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum ConversationAction {
    /// List conversations, most recently updated first
    List,
    /// Show a conversation with its messages
    Show { id: String },
    /// Start a new conversation
    New {
        /// Group the conversation under this project
        #[arg(long)]
        project: Option<String>,
    },
    /// Change a conversation's title
    Rename { id: String, title: String },
    /// Move a conversation to a project, or ungroup it when no project is given
    Move {
        id: String,
        #[arg(long)]
        project: Option<String>,
    },
    /// Delete a conversation
    Delete { id: String },
}

pub async fn run(app: &AppContext, action: ConversationAction) -> Result<()> {
    let conversations = &app.durable()?.conversations;

    match action {
        ConversationAction::List => {
            let summaries = conversations.list().await?;
            if summaries.is_empty() {
                println!("{}", "No conversations yet.".bright_black());
            }
            for summary in summaries {
                let project = summary
                    .project_id
                    .map(|p| format!(" [{}]", p))
                    .unwrap_or_default();
                println!(
                    "{}  {}{}  {}",
                    summary.id.bright_black(),
                    summary.title.bold(),
                    project.cyan(),
                    format_timestamp(summary.updated_at).bright_black()
                );
            }
        }
        ConversationAction::Show { id } => {
            let conversation = conversations.get(&id).await?;
            println!("{}", conversation.title.bold());
            for message in &conversation.messages {
                print_message(message);
            }
        }
        ConversationAction::New { project } => {
            let conversation = conversations.create(project).await?;
            println!("{} {}", "Created conversation".green(), conversation.id);
        }
        ConversationAction::Rename { id, title } => {
            let conversation = conversations.rename(&id, &title).await?;
            println!("{} {}", "Renamed to".green(), conversation.title);
        }
        ConversationAction::Move { id, project } => {
            let conversation = conversations.move_to_project(&id, project).await?;
            match conversation.project_id {
                Some(project_id) => println!("{} {}", "Moved to project".green(), project_id),
                None => println!("{}", "Conversation ungrouped".green()),
            }
        }
        ConversationAction::Delete { id } => {
            conversations.delete(&id).await?;
            println!("{} {}", "Deleted conversation".green(), id);
        }
    }
    Ok(())
}
