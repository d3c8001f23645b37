use crate::output::{excerpt, print_json, print_table, timestamp};
use anyhow::{anyhow, Context};
use blueprint_core::idea;
use clap::Subcommand;
use std::path::Path;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum IdeaSubcommand {
    /// Add an idea to the end of the list
    Add {
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// List ideas in their stored order
    List,
    /// Show one idea in full
    Show { id: Uuid },
    /// Change an idea's title or content
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete an idea
    Delete { id: Uuid },
    /// Move an idea to a zero-based position
    Move { id: Uuid, position: usize },
}

pub fn run(root: &Path, subcmd: IdeaSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        IdeaSubcommand::Add { title, content } => {
            let created = idea::create(root, title, content).context("failed to add idea")?;
            if json {
                print_json(&created)?;
            } else {
                println!("Added idea {}", created.id);
            }
            Ok(())
        }
        IdeaSubcommand::List => list(root, json),
        IdeaSubcommand::Show { id } => {
            let found = idea::get(root, id).ok_or_else(|| anyhow!("idea {id} not found"))?;
            if json {
                print_json(&found)?;
            } else {
                println!("{}\n", found.title);
                println!("{}", found.content);
            }
            Ok(())
        }
        IdeaSubcommand::Edit { id, title, content } => {
            let mut found = idea::get(root, id).ok_or_else(|| anyhow!("idea {id} not found"))?;
            if let Some(title) = title {
                found.title = title;
            }
            if let Some(content) = content {
                found.content = content;
            }
            let stored = idea::upsert(root, found).context("failed to save idea")?;
            if json {
                print_json(&stored)?;
            } else {
                println!("Updated idea {id}");
            }
            Ok(())
        }
        IdeaSubcommand::Delete { id } => {
            idea::delete(root, id).with_context(|| format!("failed to delete idea {id}"))?;
            if json {
                print_json(&serde_json::json!({ "ok": true, "id": id }))?;
            } else {
                println!("Deleted idea {id}");
            }
            Ok(())
        }
        IdeaSubcommand::Move { id, position } => {
            let ideas = idea::move_to(root, id, position)?
                .ok_or_else(|| anyhow!("idea {id} not found"))?;
            if json {
                print_json(&ideas)?;
            } else {
                print_ideas(&ideas);
            }
            Ok(())
        }
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let ideas = idea::list(root);
    if json {
        return print_json(&ideas);
    }
    if ideas.is_empty() {
        println!("No ideas yet.");
        return Ok(());
    }
    print_ideas(&ideas);
    Ok(())
}

fn print_ideas(ideas: &[idea::Idea]) {
    let rows = ideas
        .iter()
        .enumerate()
        .map(|(i, idea)| {
            vec![
                i.to_string(),
                idea.id.to_string(),
                excerpt(&idea.title, 40),
                excerpt(&idea.content, 50),
                timestamp(&idea.updated_at),
            ]
        })
        .collect();
    print_table(&["#", "ID", "TITLE", "CONTENT", "UPDATED"], rows);
}
