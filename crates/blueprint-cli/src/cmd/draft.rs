use crate::output::{print_json, print_table, timestamp};
use anyhow::{anyhow, bail, Context};
use blueprint_core::draft::{self, Draft};
use blueprint_core::template;
use blueprint_core::types::{TechChoice, WizardData, TECH_FIELDS};
use blueprint_core::wizard::{Step, WizardSession};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum DraftSubcommand {
    /// Start a new draft, optionally named
    New {
        #[arg(long)]
        name: Option<String>,
    },
    /// List all drafts
    List,
    /// Show a draft's answers
    Show { id: Uuid },
    /// Delete a draft
    Delete { id: Uuid },
    /// Move a draft to a wizard step (index 0-4 or basics|features|tech|design|review)
    Step { id: Uuid, step: String },
    /// Set one tech selection; no values clears it
    Tech {
        id: Uuid,
        /// language, framework, uiux, database, storage, cicd, payment,
        /// integrations, performance-requirements, auth-needs, auth-method
        field: String,
        values: Vec<String>,
        /// Leave this choice to the generator
        #[arg(long, conflicts_with = "values")]
        ai_decide: bool,
    },
    /// Load wizard answers from a YAML or JSON file into a draft
    Import {
        file: PathBuf,
        /// Overwrite this draft instead of creating a new one
        #[arg(long)]
        id: Option<Uuid>,
    },
    /// Save a draft's tech selections as a reusable template
    SaveTemplate {
        id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

pub fn run(root: &Path, subcmd: DraftSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        DraftSubcommand::New { name } => new(root, name, json),
        DraftSubcommand::List => list(root, json),
        DraftSubcommand::Show { id } => show(root, id, json),
        DraftSubcommand::Delete { id } => delete(root, id, json),
        DraftSubcommand::Step { id, step: target } => step(root, id, &target, json),
        DraftSubcommand::Tech {
            id,
            field,
            values,
            ai_decide,
        } => tech(root, id, &field, values, ai_decide, json),
        DraftSubcommand::Import { file, id } => import(root, &file, id, json),
        DraftSubcommand::SaveTemplate {
            id,
            name,
            description,
        } => save_template(root, id, name, description, json),
    }
}

fn resume(root: &Path, id: Uuid) -> anyhow::Result<WizardSession> {
    WizardSession::resume_draft(root, id).ok_or_else(|| anyhow!("draft {id} not found"))
}

fn draft_name(d: &Draft) -> &str {
    let name = d.wizard_data.basics.name.trim();
    if name.is_empty() {
        "Untitled"
    } else {
        name
    }
}

fn report(saved: &Draft, verb: &str, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(saved)
    } else {
        println!(
            "{verb} draft {} at step {}",
            saved.id,
            Step::clamped(saved.current_step)
        );
        Ok(())
    }
}

fn new(root: &Path, name: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut session = WizardSession::new();
    if let Some(name) = name {
        session.edit(|d| d.basics.name = name);
    }
    let saved = session.save_draft(root).context("failed to save draft")?;
    report(&saved, "Created", json)
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let drafts = draft::list(root);
    if json {
        return print_json(&drafts);
    }
    if drafts.is_empty() {
        println!("No drafts. Start one with: blueprint draft new --name <NAME>");
        return Ok(());
    }
    let rows = drafts
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                draft_name(d).to_string(),
                Step::clamped(d.current_step).to_string(),
                timestamp(&d.updated_at),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STEP", "UPDATED"], rows);
    Ok(())
}

fn show(root: &Path, id: Uuid, json: bool) -> anyhow::Result<()> {
    let d = draft::get(root, id).ok_or_else(|| anyhow!("draft {id} not found"))?;
    if json {
        return print_json(&d);
    }
    println!("Draft: {} ({})", draft_name(&d), d.id);
    println!("Step:  {}", Step::clamped(d.current_step));
    println!("{}", serde_yaml::to_string(&d.wizard_data)?);
    Ok(())
}

fn delete(root: &Path, id: Uuid, json: bool) -> anyhow::Result<()> {
    draft::delete(root, id).with_context(|| format!("failed to delete draft {id}"))?;
    if json {
        print_json(&serde_json::json!({ "ok": true, "id": id }))?;
    } else {
        println!("Deleted draft {id}");
    }
    Ok(())
}

fn step(root: &Path, id: Uuid, step: &str, json: bool) -> anyhow::Result<()> {
    let target: Step = step.parse()?;
    let mut session = resume(root, id)?;
    session.go_to(root, target)?;
    let saved = draft::get(root, id).ok_or_else(|| anyhow!("draft {id} not found"))?;
    report(&saved, "Moved", json)
}

fn tech(
    root: &Path,
    id: Uuid,
    field: &str,
    values: Vec<String>,
    ai_decide: bool,
    json: bool,
) -> anyhow::Result<()> {
    let choice = if ai_decide {
        TechChoice::AiDecide
    } else {
        TechChoice::explicit(values)
    };
    let mut session = resume(root, id)?;
    let Some(stored) = session.edit(|d| {
        d.tech.field_mut(field).map(|slot| {
            *slot = choice;
            slot.clone()
        })
    }) else {
        bail!(
            "unknown tech field '{field}'; expected one of: {}",
            TECH_FIELDS.join(", ")
        );
    };
    let saved = session.save_draft(root).context("failed to save draft")?;
    if json {
        return print_json(&saved);
    }
    let shown = match &stored {
        TechChoice::AiDecide => "AI decides".to_string(),
        choice if choice.is_unspecified() => "(none)".to_string(),
        choice => choice.values().join(", "),
    };
    println!("Set {field} on draft {}: {shown}", saved.id);
    Ok(())
}

fn import(root: &Path, file: &Path, id: Option<Uuid>, json: bool) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    // YAML is a superset of JSON, so one parser covers both.
    let data: WizardData = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse wizard answers in {}", file.display()))?;

    let mut session = match id {
        Some(id) => resume(root, id)?,
        None => WizardSession::new(),
    };
    session.edit(|d| *d = data);
    let saved = session.save_draft(root).context("failed to save draft")?;
    report(&saved, "Imported", json)
}

fn save_template(
    root: &Path,
    id: Uuid,
    name: String,
    description: String,
    json: bool,
) -> anyhow::Result<()> {
    let session = resume(root, id)?;
    let created = template::create(root, name, description, session.data().tech.clone())
        .context("failed to save template")?;
    if json {
        print_json(&created)?;
    } else {
        println!("Saved template '{}' ({})", created.name, created.id);
    }
    Ok(())
}
