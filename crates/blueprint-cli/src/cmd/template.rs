use crate::output::{print_json, print_table};
use anyhow::{anyhow, Context};
use blueprint_core::prompt::format_tech;
use blueprint_core::template::{self, TechTemplate};
use blueprint_core::wizard::WizardSession;
use clap::Subcommand;
use std::path::Path;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum TemplateSubcommand {
    /// List saved tech templates
    List,
    /// Show a template's eleven tech selections
    Show { id: Uuid },
    /// Delete a template
    Delete { id: Uuid },
    /// Replace a draft's tech selections with a template's
    Apply {
        id: Uuid,
        #[arg(long)]
        draft: Uuid,
    },
}

pub fn run(root: &Path, subcmd: TemplateSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TemplateSubcommand::List => list(root, json),
        TemplateSubcommand::Show { id } => show(root, id, json),
        TemplateSubcommand::Delete { id } => {
            template::delete(root, id).with_context(|| format!("failed to delete template {id}"))?;
            if json {
                print_json(&serde_json::json!({ "ok": true, "id": id }))?;
            } else {
                println!("Deleted template {id}");
            }
            Ok(())
        }
        TemplateSubcommand::Apply { id, draft } => apply(root, id, draft, json),
    }
}

fn load(root: &Path, id: Uuid) -> anyhow::Result<TechTemplate> {
    template::get(root, id).ok_or_else(|| anyhow!("template {id} not found"))
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let templates = template::list(root);
    if json {
        return print_json(&templates);
    }
    if templates.is_empty() {
        println!("No templates. Save one with: blueprint draft save-template <ID> --name <NAME>");
        return Ok(());
    }
    let rows = templates
        .iter()
        .map(|t| {
            let chosen = t
                .tech
                .labelled()
                .iter()
                .filter(|(_, c)| !c.is_unspecified())
                .count();
            vec![
                t.id.to_string(),
                t.name.clone(),
                t.description.clone(),
                format!("{chosen}/11"),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "DESCRIPTION", "SET"], rows);
    Ok(())
}

fn show(root: &Path, id: Uuid, json: bool) -> anyhow::Result<()> {
    let t = load(root, id)?;
    if json {
        return print_json(&t);
    }
    println!("Template: {} ({})", t.name, t.id);
    if !t.description.is_empty() {
        println!("{}", t.description);
    }
    println!();
    for (label, choice) in t.tech.labelled() {
        println!("  {label:<26} {}", format_tech(choice));
    }
    Ok(())
}

fn apply(root: &Path, id: Uuid, draft: Uuid, json: bool) -> anyhow::Result<()> {
    let t = load(root, id)?;
    let mut session =
        WizardSession::resume_draft(root, draft).ok_or_else(|| anyhow!("draft {draft} not found"))?;
    session.apply_template(&t);
    let saved = session.save_draft(root).context("failed to save draft")?;
    if json {
        print_json(&saved)?;
    } else {
        println!("Applied template '{}' to draft {}", t.name, saved.id);
    }
    Ok(())
}
