pub mod config;
pub mod draft;
pub mod generate;
pub mod idea;
pub mod init;
pub mod production;
pub mod project;
pub mod prompt;
pub mod serve;
pub mod template;

use anyhow::anyhow;
use blueprint_core::types::DocType;
use blueprint_core::wizard::WizardSession;
use std::path::Path;
use uuid::Uuid;

/// Open a wizard session over a draft or an existing project.
pub(crate) fn open_session(
    root: &Path,
    draft: Option<Uuid>,
    project: Option<Uuid>,
) -> anyhow::Result<WizardSession> {
    match (draft, project) {
        (Some(id), _) => {
            WizardSession::resume_draft(root, id).ok_or_else(|| anyhow!("draft {id} not found"))
        }
        (None, Some(id)) => {
            WizardSession::edit_project(root, id).ok_or_else(|| anyhow!("project {id} not found"))
        }
        (None, None) => Err(anyhow!("pass --draft <ID> or --project <ID>")),
    }
}

pub(crate) fn parse_docs(raw: &[String]) -> anyhow::Result<Vec<DocType>> {
    raw.iter()
        .map(|s| s.parse::<DocType>().map_err(anyhow::Error::from))
        .collect()
}
