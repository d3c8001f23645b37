use crate::output::{print_json, print_table, timestamp};
use anyhow::{anyhow, Context};
use blueprint_core::project::{self, Project};
use blueprint_core::types::DocType;
use clap::Subcommand;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum ProjectSubcommand {
    /// List all projects
    List,
    /// Show a project's answers and which documents exist
    Show { id: Uuid },
    /// Delete a project
    Delete { id: Uuid },
    /// Write a generated document to `<name>-<PRD|TDD>.md`
    Export {
        id: Uuid,
        /// Document type: prd or tdd
        #[arg(long = "doc", value_name = "DOC")]
        doc: String,
        /// Directory to write into (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the markdown instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
}

pub fn run(root: &Path, subcmd: ProjectSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ProjectSubcommand::List => list(root, json),
        ProjectSubcommand::Show { id } => show(root, id, json),
        ProjectSubcommand::Delete { id } => delete(root, id, json),
        ProjectSubcommand::Export {
            id,
            doc,
            out,
            stdout,
        } => export(root, id, &doc, out, stdout, json),
    }
}

fn load(root: &Path, id: Uuid) -> anyhow::Result<Project> {
    project::get(root, id).ok_or_else(|| anyhow!("project {id} not found"))
}

fn doc_flags(p: &Project) -> String {
    let present: Vec<&str> = DocType::all()
        .iter()
        .filter(|d| p.document(**d).is_some())
        .map(|d| d.label())
        .collect();
    if present.is_empty() {
        "-".to_string()
    } else {
        present.join(", ")
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let projects = project::list(root);
    if json {
        return print_json(&projects);
    }
    if projects.is_empty() {
        println!("No projects yet. Generate one with: blueprint generate --draft <ID> --doc prd");
        return Ok(());
    }
    let rows = projects
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.display_name().to_string(),
                p.wizard_data.basics.app_type.to_string(),
                doc_flags(p),
                timestamp(&p.updated_at),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "TYPE", "DOCS", "UPDATED"], rows);
    Ok(())
}

fn show(root: &Path, id: Uuid, json: bool) -> anyhow::Result<()> {
    let p = load(root, id)?;
    if json {
        return print_json(&p);
    }
    let basics = &p.wizard_data.basics;
    println!("Project: {} ({})", p.display_name(), p.id);
    println!("Type:        {}", basics.app_type);
    if !basics.description.is_empty() {
        println!("Description: {}", basics.description);
    }
    println!("Features:    {}", p.wizard_data.features.features.len());
    println!("Documents:   {}", doc_flags(&p));
    println!("Created:     {}", timestamp(&p.created_at));
    println!("Updated:     {}", timestamp(&p.updated_at));
    Ok(())
}

fn delete(root: &Path, id: Uuid, json: bool) -> anyhow::Result<()> {
    project::delete(root, id).with_context(|| format!("failed to delete project {id}"))?;
    if json {
        print_json(&serde_json::json!({ "ok": true, "id": id }))?;
    } else {
        println!("Deleted project {id}");
    }
    Ok(())
}

fn export(
    root: &Path,
    id: Uuid,
    doc: &str,
    out: Option<PathBuf>,
    stdout: bool,
    json: bool,
) -> anyhow::Result<()> {
    let doc: DocType = doc.parse()?;
    let p = load(root, id)?;
    let exported = project::export_markdown(&p, doc)?;

    if stdout {
        print!("{}", exported.content);
        return Ok(());
    }

    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(&exported.file_name);
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    std::fs::write(&path, &exported.content)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        print_json(&serde_json::json!({ "path": path }))?;
    } else {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
