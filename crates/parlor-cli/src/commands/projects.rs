use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use parlor_core::project::ProjectUpdate;

use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects, most recently updated first
    List,
    /// Show a project and its instructions
    Show { id: String },
    /// Create a project
    New { name: String },
    /// Change a project's name or instructions
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
    },
    /// Delete a project; its conversations are kept and ungrouped
    Delete { id: String },
}

pub async fn run(app: &AppContext, action: ProjectAction) -> Result<()> {
    let projects = &app.durable()?.projects;

    match action {
        ProjectAction::List => {
            for project in projects.list().await? {
                println!("{}  {}", project.id.bright_black(), project.name.bold());
            }
        }
        ProjectAction::Show { id } => {
            let project = projects.get(&id).await?;
            println!("{}", project.name.bold());
            if project.instructions.is_empty() {
                println!("{}", "(no instructions)".bright_black());
            } else {
                println!("{}", project.instructions);
            }
        }
        ProjectAction::New { name } => {
            let project = projects.create(&name).await?;
            println!("{} {}", "Created project".green(), project.id);
        }
        ProjectAction::Update {
            id,
            name,
            instructions,
        } => {
            let project = projects
                .update(&id, ProjectUpdate { name, instructions })
                .await?;
            println!("{} {}", "Updated project".green(), project.name);
        }
        ProjectAction::Delete { id } => {
            projects.delete(&id).await?;
            println!("{} {}", "Deleted project".green(), id);
        }
    }
    Ok(())
}
