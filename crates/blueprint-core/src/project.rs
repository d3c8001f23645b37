//! Projects — a finished wizard answer-set plus its generated documents.

use crate::error::{BlueprintError, Result};
use crate::store::{self, Collections, Record};
use crate::types::{DocType, WizardData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub wizard_data: WizardData,
    #[serde(
        rename = "generatedPRD",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_prd: Option<String>,
    #[serde(
        rename = "generatedTDD",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_tdd: Option<String>,
}

impl Project {
    pub fn new(wizard_data: WizardData) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            wizard_data,
            generated_prd: None,
            generated_tdd: None,
        }
    }

    pub fn document(&self, doc: DocType) -> Option<&str> {
        match doc {
            DocType::Prd => self.generated_prd.as_deref(),
            DocType::Tdd => self.generated_tdd.as_deref(),
        }
    }

    pub fn set_document(&mut self, doc: DocType, content: String) {
        match doc {
            DocType::Prd => self.generated_prd = Some(content),
            DocType::Tdd => self.generated_tdd = Some(content),
        }
    }

    /// The project name, or "Untitled" while it is still blank.
    pub fn display_name(&self) -> &str {
        let name = self.wizard_data.basics.name.trim();
        if name.is_empty() {
            "Untitled"
        } else {
            name
        }
    }
}

impl Record for Project {
    const COLLECTION: &'static str = "projects";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.projects
    }
}

/// A generated document ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Export {
    pub file_name: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn list(root: &Path) -> Vec<Project> {
    store::list(root)
}

pub fn get(root: &Path, id: Uuid) -> Option<Project> {
    store::get(root, id)
}

pub fn upsert(root: &Path, project: Project) -> Result<Project> {
    store::upsert(root, project)
}

pub fn delete(root: &Path, id: Uuid) -> Result<()> {
    store::delete::<Project>(root, id)
}

/// Persist a new project with an all-blank answer-set.
pub fn create_empty(root: &Path) -> Result<Project> {
    create(root, WizardData::default())
}

/// Persist a new project from the given answers.
pub fn create(root: &Path, wizard_data: WizardData) -> Result<Project> {
    store::upsert(root, Project::new(wizard_data))
}

/// Package one generated document as `<name>-<PRD|TDD>.md`.
pub fn export_markdown(project: &Project, doc: DocType) -> Result<Export> {
    let content = project
        .document(doc)
        .ok_or_else(|| BlueprintError::DocumentMissing(doc.label().to_string()))?;
    let name = project.wizard_data.basics.name.trim();
    let stem = if name.is_empty() { "document" } else { name };
    Ok(Export {
        file_name: format!("{stem}-{}.md", doc.label()),
        content: content.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
