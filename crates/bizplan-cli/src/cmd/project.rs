use crate::output::print_json;
use anyhow::Context;
use bizplan_core::{project::Project, storage::LocalStore};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ProjectSubcommand {
    /// Start a new business plan; the wizard restarts at step 1
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show the current project
    Show,
}

pub fn run(root: &Path, subcmd: ProjectSubcommand, json: bool) -> anyhow::Result<()> {
    let store = LocalStore::new(root);
    match subcmd {
        ProjectSubcommand::Create { name, description } => {
            let project = Project::create(&store, &name, description, chrono::Utc::now())
                .context("failed to create project")?;
            tracing::debug!(id = %project.id, "project created");
            if json {
                print_json(&project)?;
            } else {
                println!("Created project '{}' ({})", project.name, project.id);
                println!("Wizard reset to step 1.");
            }
        }
        ProjectSubcommand::Show => {
            let project = Project::load(&store)?;
            if json {
                print_json(&project)?;
            } else {
                println!("Project: {}", project.name);
                println!("ID:      {}", project.id);
                if let Some(desc) = &project.description {
                    println!("About:   {desc}");
                }
                println!("Created: {}", project.created_at.to_rfc3339());
            }
        }
    }
    Ok(())
}
