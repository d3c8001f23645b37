use super::{open_session, parse_docs};
use crate::output::print_json;
use anyhow::Context;
use blueprint_core::config::Config;
use blueprint_core::error::BlueprintError;
use blueprint_core::types::DocType;
use llm_client::ResponsesClient;
use std::path::Path;
use uuid::Uuid;

pub fn run(
    root: &Path,
    draft: Option<Uuid>,
    project: Option<Uuid>,
    docs: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let docs = parse_docs(docs)?;
    anyhow::ensure!(!docs.is_empty(), BlueprintError::NoDocumentsSelected);
    let mut session = open_session(root, draft, project)?;

    let config = Config::load(root).context("failed to load config")?;
    let client = ResponsesClient::new(config.generation.client_config());

    if !json {
        let names: Vec<&str> = DocType::all()
            .iter()
            .filter(|d| docs.contains(d))
            .map(|d| d.label())
            .collect();
        eprintln!(
            "Generating {} with {}...",
            names.join(" + "),
            config.generation.model
        );
    }

    let result = session.generate(root, &client, &docs);
    let project = match result {
        Ok(p) => p,
        Err(e) => {
            if let Some(id) = session.project_id() {
                tracing::debug!(project = %id, "project kept without new documents");
            }
            return Err(e).context("generation failed; no documents were saved");
        }
    };

    if json {
        print_json(&project)?;
    } else {
        println!("Project {} ({})", project.display_name(), project.id);
        for doc in DocType::all() {
            if let Some(text) = project.document(*doc) {
                println!("  {}: {} chars", doc.label(), text.chars().count());
            }
        }
        println!("Export with: blueprint project export {} --doc prd", project.id);
    }
    Ok(())
}
