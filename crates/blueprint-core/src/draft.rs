//! Drafts — resumable checkpoints of an in-progress wizard session.

use crate::error::Result;
use crate::store::{self, Collections, Record};
use crate::types::WizardData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub wizard_data: WizardData,
    /// Wizard step index (0 = Basics … 4 = Review).
    #[serde(default)]
    pub current_step: usize,
}

impl Draft {
    pub fn new(wizard_data: WizardData, current_step: usize) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            wizard_data,
            current_step,
        }
    }
}

impl Record for Draft {
    const COLLECTION: &'static str = "drafts";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.drafts
    }
}

pub fn list(root: &Path) -> Vec<Draft> {
    store::list(root)
}

pub fn get(root: &Path, id: Uuid) -> Option<Draft> {
    store::get(root, id)
}

pub fn upsert(root: &Path, draft: Draft) -> Result<Draft> {
    store::upsert(root, draft)
}

pub fn delete(root: &Path, id: Uuid) -> Result<()> {
    store::delete::<Draft>(root, id)
}

/// Persist a blank draft positioned at the first step.
pub fn create_empty(root: &Path) -> Result<Draft> {
    store::upsert(root, Draft::new(WizardData::default(), 0))
}
