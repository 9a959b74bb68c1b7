use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum MemoryAction {
    /// List memories in the order they were added
    List,
    /// Remember a fact (up to 500 characters)
    Add { content: String },
    /// Forget a memory
    Delete { id: String },
}

pub async fn run(app: &AppContext, action: MemoryAction) -> Result<()> {
    let memories = &app.durable()?.memories;

    match action {
        MemoryAction::List => {
            for memory in memories.list().await? {
                println!("{}  {}", memory.id.bright_black(), memory.content);
            }
        }
        MemoryAction::Add { content } => {
            let memory = memories.add(&content).await?;
            println!("{} {}", "Added memory".green(), memory.id);
        }
        MemoryAction::Delete { id } => {
            memories.delete(&id).await?;
            println!("{} {}", "Deleted memory".green(), id);
        }
    }
    Ok(())
}
