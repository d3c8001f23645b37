use crate::output::{print_json, print_table};
use anyhow::{anyhow, Context};
use blueprint_core::production::{self, NewProduction, PLATFORM_OPTIONS, STATUS_OPTIONS};
use clap::{Args, Subcommand};
use std::path::Path;
use uuid::Uuid;

#[derive(Args, Default)]
pub struct ProductionFields {
    #[arg(long)]
    pub url: Option<String>,
    /// App version
    #[arg(id = "app_version", long = "app-version", value_name = "VERSION")]
    pub version: Option<String>,
    /// Release date, free-form (e.g. 2026-03-01)
    #[arg(long)]
    pub release_date: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Screenshot URL (repeatable)
    #[arg(long = "screenshot", value_name = "URL")]
    pub screenshots: Vec<String>,
}

#[derive(Subcommand)]
pub enum ProductionSubcommand {
    /// Register a shipped app
    Add {
        name: String,
        /// One of: App Store, Play Store, Web, Desktop, Other
        #[arg(long)]
        platform: String,
        /// One of: live, beta, archived, maintenance
        #[arg(long, default_value = "live")]
        status: String,
        #[command(flatten)]
        fields: ProductionFields,
    },
    /// List tracked apps
    List,
    /// Show one app
    Show { id: Uuid },
    /// Change fields on a tracked app
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        fields: ProductionFields,
    },
    /// Stop tracking an app
    Delete { id: Uuid },
}

pub fn run(root: &Path, subcmd: ProductionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ProductionSubcommand::Add {
            name,
            platform,
            status,
            fields,
        } => add(root, name, platform, status, fields, json),
        ProductionSubcommand::List => list(root, json),
        ProductionSubcommand::Show { id } => show(root, id, json),
        ProductionSubcommand::Update {
            id,
            name,
            platform,
            status,
            fields,
        } => update(root, id, name, platform, status, fields, json),
        ProductionSubcommand::Delete { id } => {
            production::delete(root, id)
                .with_context(|| format!("failed to delete production {id}"))?;
            if json {
                print_json(&serde_json::json!({ "ok": true, "id": id }))?;
            } else {
                println!("Deleted production {id}");
            }
            Ok(())
        }
    }
}

fn screenshots(urls: Vec<String>) -> Option<Vec<String>> {
    (!urls.is_empty()).then_some(urls)
}

fn add(
    root: &Path,
    name: String,
    platform: String,
    status: String,
    fields: ProductionFields,
    json: bool,
) -> anyhow::Result<()> {
    let created = production::create(
        root,
        NewProduction {
            name,
            url: fields.url,
            platform,
            status,
            version: fields.version,
            release_date: fields.release_date,
            description: fields.description,
            notes: fields.notes.unwrap_or_default(),
            screenshot_urls: screenshots(fields.screenshots),
        },
    )
    .with_context(|| {
        format!(
            "platform must be one of {:?}, status one of {:?}",
            PLATFORM_OPTIONS, STATUS_OPTIONS
        )
    })?;
    if json {
        print_json(&created)?;
    } else {
        println!("Tracking '{}' ({})", created.name, created.id);
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let all = production::list(root);
    if json {
        return print_json(&all);
    }
    if all.is_empty() {
        println!("No productions tracked.");
        return Ok(());
    }
    let rows = all
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.platform.clone(),
                p.status.clone(),
                p.version.clone().unwrap_or_default(),
                p.url.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "PLATFORM", "STATUS", "VERSION", "URL"], rows);
    Ok(())
}

fn show(root: &Path, id: Uuid, json: bool) -> anyhow::Result<()> {
    let p = production::get(root, id).ok_or_else(|| anyhow!("production {id} not found"))?;
    if json {
        return print_json(&p);
    }
    println!("{} ({})", p.name, p.id);
    println!("Platform: {}", p.platform);
    println!("Status:   {}", p.status);
    for (label, value) in [
        ("Version:  ", &p.version),
        ("Released: ", &p.release_date),
        ("URL:      ", &p.url),
        ("About:    ", &p.description),
    ] {
        if let Some(v) = value {
            println!("{label}{v}");
        }
    }
    if !p.notes.is_empty() {
        println!("\n{}", p.notes);
    }
    for url in p.screenshot_urls.iter().flatten() {
        println!("screenshot: {url}");
    }
    Ok(())
}

fn update(
    root: &Path,
    id: Uuid,
    name: Option<String>,
    platform: Option<String>,
    status: Option<String>,
    fields: ProductionFields,
    json: bool,
) -> anyhow::Result<()> {
    let mut p = production::get(root, id).ok_or_else(|| anyhow!("production {id} not found"))?;
    if let Some(v) = name {
        p.name = v;
    }
    if let Some(v) = platform {
        p.platform = v;
    }
    if let Some(v) = status {
        p.status = v;
    }
    p.url = fields.url.or(p.url);
    p.version = fields.version.or(p.version);
    p.release_date = fields.release_date.or(p.release_date);
    p.description = fields.description.or(p.description);
    if let Some(notes) = fields.notes {
        p.notes = notes;
    }
    if let Some(urls) = screenshots(fields.screenshots) {
        p.screenshot_urls = Some(urls);
    }
    let stored = production::upsert(root, p).context("failed to update production")?;
    if json {
        print_json(&stored)?;
    } else {
        println!("Updated '{}'", stored.name);
    }
    Ok(())
}
