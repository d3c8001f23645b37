//! Productions — a tracker for shipped apps and where they are deployed.

use crate::error::{BlueprintError, Result};
use crate::store::{self, Collections, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

pub const PLATFORM_OPTIONS: [&str; 5] = ["App Store", "Play Store", "Web", "Desktop", "Other"];
pub const STATUS_OPTIONS: [&str; 4] = ["live", "beta", "archived", "maintenance"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Platform and status are stored as free strings so records written by other
/// tools still load; [`validate_platform`] and [`validate_status`] gate writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Production {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_urls: Option<Vec<String>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Everything a caller supplies when registering a production.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduction {
    pub name: String,
    pub url: Option<String>,
    pub platform: String,
    pub status: String,
    pub version: Option<String>,
    pub release_date: Option<String>,
    pub description: Option<String>,
    pub notes: String,
    pub screenshot_urls: Option<Vec<String>>,
}

impl Production {
    pub fn new(data: NewProduction) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            url: data.url,
            platform: data.platform,
            status: data.status,
            version: data.version,
            release_date: data.release_date,
            description: data.description,
            notes: data.notes,
            screenshot_urls: data.screenshot_urls,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Production {
    const COLLECTION: &'static str = "productions";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn validate(&self) -> Result<()> {
        validate_platform(&self.platform)?;
        validate_status(&self.status)
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.productions
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_platform(platform: &str) -> Result<()> {
    if PLATFORM_OPTIONS.contains(&platform) {
        Ok(())
    } else {
        Err(BlueprintError::InvalidValue {
            field: "platform",
            value: platform.to_string(),
        })
    }
}

pub fn validate_status(status: &str) -> Result<()> {
    if STATUS_OPTIONS.contains(&status) {
        Ok(())
    } else {
        Err(BlueprintError::InvalidValue {
            field: "status",
            value: status.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn list(root: &Path) -> Vec<Production> {
    store::list(root)
}

pub fn get(root: &Path, id: Uuid) -> Option<Production> {
    store::get(root, id)
}

pub fn upsert(root: &Path, production: Production) -> Result<Production> {
    store::upsert(root, production)
}

pub fn delete(root: &Path, id: Uuid) -> Result<()> {
    store::delete::<Production>(root, id)
}

/// Register a new production. Platform and status must be known options.
pub fn create(root: &Path, data: NewProduction) -> Result<Production> {
    store::upsert(root, Production::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> NewProduction {
        NewProduction {
            name: "Ledger".into(),
            platform: "Web".into(),
            status: "live".into(),
            url: Some("https://ledger.example".into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_and_list() {
        let dir = TempDir::new().unwrap();
        let p = create(dir.path(), sample()).unwrap();
        assert_eq!(list(dir.path()), vec![p]);
    }

    #[test]
    fn create_rejects_unknown_platform() {
        let dir = TempDir::new().unwrap();
        let err = create(
            dir.path(),
            NewProduction {
                platform: "Fridge".into(),
                ..sample()
            },
        )
        .unwrap_err();
        assert!(matches!(err, BlueprintError::InvalidValue { field: "platform", .. }));
        assert!(list(dir.path()).is_empty());
    }

    #[test]
    fn create_rejects_unknown_status() {
        let dir = TempDir::new().unwrap();
        assert!(create(
            dir.path(),
            NewProduction {
                status: "gone".into(),
                ..sample()
            }
        )
        .is_err());
    }

    #[test]
    fn optional_fields_are_omitted() {
        let p = Production::new(sample());
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("version").is_none());
        assert!(json.get("screenshotUrls").is_none());
        assert_eq!(json["url"], "https://ledger.example");
    }

    #[test]
    fn update_rechecks_options() {
        let dir = TempDir::new().unwrap();
        let mut p = create(dir.path(), sample()).unwrap();
        p.status = "retired".into();
        assert!(upsert(dir.path(), p).is_err());
        assert_eq!(get(dir.path(), list(dir.path())[0].id).unwrap().status, "live");
    }

    #[test]
    fn unknown_status_still_loads() {
        let p: Production =
            serde_json::from_str(r#"{"name": "x", "platform": "Kiosk", "status": "sunset", "notes": ""}"#)
                .unwrap();
        assert_eq!(p.status, "sunset");
    }
}
