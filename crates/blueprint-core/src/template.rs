//! Tech templates — named snapshots of the eleven tech selections.

use crate::error::Result;
use crate::store::{self, Collections, Record};
use crate::types::ProjectTech;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechTemplate {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: ProjectTech,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl TechTemplate {
    pub fn new(name: impl Into<String>, description: impl Into<String>, tech: ProjectTech) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            tech,
            created_at: Utc::now(),
        }
    }

    /// Overwrite every tech field with this template's selections.
    pub fn apply_to(&self, tech: &mut ProjectTech) {
        *tech = self.tech.clone();
    }
}

impl Record for TechTemplate {
    const COLLECTION: &'static str = "templates";

    fn id(&self) -> Uuid {
        self.id
    }

    // Templates carry only a creation timestamp.
    fn touch(&mut self, _now: DateTime<Utc>) {}

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.templates
    }
}

pub fn list(root: &Path) -> Vec<TechTemplate> {
    store::list(root)
}

pub fn get(root: &Path, id: Uuid) -> Option<TechTemplate> {
    store::get(root, id)
}

pub fn upsert(root: &Path, template: TechTemplate) -> Result<TechTemplate> {
    store::upsert(root, template)
}

pub fn delete(root: &Path, id: Uuid) -> Result<()> {
    store::delete::<TechTemplate>(root, id)
}

pub fn create(
    root: &Path,
    name: impl Into<String>,
    description: impl Into<String>,
    tech: ProjectTech,
) -> Result<TechTemplate> {
    store::upsert(root, TechTemplate::new(name, description, tech))
}
