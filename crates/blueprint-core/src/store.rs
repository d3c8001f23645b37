//! Record store — the five persisted collections, read and written whole.
//!
//! Layout:
//!   .blueprint/data.json   — `{projects, drafts, ideas, templates, productions}`
//!
//! Reads never fail: a missing store is seeded with the empty default, and an
//! unreadable or corrupt one degrades to it (each bad file is copied to its
//! own `data.json.corrupt-<timestamp>`). Writes replace the whole file atomically. There is no
//! locking; concurrent writers are last-write-wins.

use crate::draft::Draft;
use crate::error::{BlueprintError, Result};
use crate::idea::Idea;
use crate::production::Production;
use crate::project::Project;
use crate::template::TechTemplate;
use crate::{io, paths};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collections {
    pub projects: Vec<Project>,
    pub drafts: Vec<Draft>,
    pub ideas: Vec<Idea>,
    pub templates: Vec<TechTemplate>,
    pub productions: Vec<Production>,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A persisted entity that lives in exactly one collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Collection name, as used in the store file and the HTTP routes.
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;

    /// Refresh the modification timestamp. A no-op for records without one.
    fn touch(&mut self, now: DateTime<Utc>);

    /// Reject values this collection must never store.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self>;
}

// ---------------------------------------------------------------------------
// Whole-store I/O
// ---------------------------------------------------------------------------

pub fn read_all(root: &Path) -> Collections {
    let path = paths::data_path(root);
    if !path.exists() {
        let empty = Collections::default();
        if let Err(e) = write_all(root, &empty) {
            tracing::warn!(path = %path.display(), error = %e, "could not seed record store");
        }
        return empty;
    }

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "record store unreadable; using empty collections");
            return Collections::default();
        }
    };
    if content.trim().is_empty() {
        return Collections::default();
    }

    match serde_json::from_str(&content) {
        Ok(all) => all,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "record store corrupt; using empty collections");
            let backup = corrupt_backup_path(&path);
            match io::atomic_write(&backup, content.as_bytes()) {
                Ok(()) => tracing::warn!(path = %backup.display(), "corrupt store backed up"),
                Err(e) => {
                    tracing::warn!(path = %backup.display(), error = %e, "could not back up corrupt store")
                }
            }
            Collections::default()
        }
    }
}

fn corrupt_backup_path(path: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.9fZ");
    path.with_extension(format!("json.corrupt-{stamp}"))
}

pub fn write_all(root: &Path, all: &Collections) -> Result<()> {
    let path = paths::data_path(root);
    let data = serde_json::to_string_pretty(all)?;
    io::atomic_write(&path, data.as_bytes())?;
    tracing::debug!(path = %path.display(), "record store written");
    Ok(())
}

// ---------------------------------------------------------------------------
// Typed collection operations
// ---------------------------------------------------------------------------

/// Every record of `T`, in stored order.
pub fn list<T: Record>(root: &Path) -> Vec<T> {
    let mut all = read_all(root);
    std::mem::take(T::collection_mut(&mut all))
}

pub fn get<T: Record>(root: &Path, id: Uuid) -> Option<T> {
    let mut all = read_all(root);
    let records = std::mem::take(T::collection_mut(&mut all));
    records.into_iter().find(|r| r.id() == id)
}

/// Insert `record`, or fully replace the stored record with the same id.
/// Replacement keeps the record's position. Returns the stored record.
pub fn upsert<T: Record>(root: &Path, mut record: T) -> Result<T> {
    record.validate()?;
    record.touch(Utc::now());
    let mut all = read_all(root);
    let records = T::collection_mut(&mut all);
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(existing) => *existing = record.clone(),
        None => records.push(record.clone()),
    }
    write_all(root, &all)?;
    tracing::debug!(collection = T::COLLECTION, id = %record.id(), "record upserted");
    Ok(record)
}

/// Remove the record with `id`. Missing ids are a successful no-op.
pub fn delete<T: Record>(root: &Path, id: Uuid) -> Result<()> {
    let mut all = read_all(root);
    let records = T::collection_mut(&mut all);
    let before = records.len();
    records.retain(|r| r.id() != id);
    if records.len() == before {
        return Ok(());
    }
    write_all(root, &all)?;
    tracing::debug!(collection = T::COLLECTION, %id, "record deleted");
    Ok(())
}

/// Replace the entire collection with `records`, preserving their order.
/// Every id must appear at most once.
pub fn replace_all<T: Record>(root: &Path, records: Vec<T>) -> Result<Vec<T>> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id()) {
            return Err(BlueprintError::InvalidValue {
                field: "id",
                value: record.id().to_string(),
            });
        }
        record.validate()?;
    }
    let mut all = read_all(root);
    *T::collection_mut(&mut all) = records.clone();
    write_all(root, &all)?;
    tracing::debug!(collection = T::COLLECTION, count = records.len(), "collection replaced");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_store_is_seeded() {
        let dir = TempDir::new().unwrap();
        let all = read_all(dir.path());
        assert_eq!(all, Collections::default());
        let raw = std::fs::read_to_string(paths::data_path(dir.path())).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        for key in ["projects", "drafts", "ideas", "templates", "productions"] {
            assert_eq!(json[key], serde_json::json!([]), "{key}");
        }
    }

    fn corrupt_backups(dir: &TempDir) -> Vec<String> {
        let mut backups: Vec<String> = std::fs::read_dir(paths::blueprint_dir(dir.path()))
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("data.json.corrupt-"))
            })
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect();
        backups.sort();
        backups
    }

    #[test]
    fn corrupt_store_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = paths::data_path(dir.path());
        io::atomic_write(&path, b"{ not json").unwrap();
        assert_eq!(read_all(dir.path()), Collections::default());
        assert_eq!(corrupt_backups(&dir), vec!["{ not json".to_string()]);
    }

    #[test]
    fn every_corruption_gets_its_own_backup() {
        let dir = TempDir::new().unwrap();
        let path = paths::data_path(dir.path());

        io::atomic_write(&path, b"{ first corrupt").unwrap();
        upsert(dir.path(), Idea::new("a", "")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        io::atomic_write(&path, b"{ second corrupt").unwrap();
        upsert(dir.path(), Idea::new("b", "")).unwrap();

        assert_eq!(
            corrupt_backups(&dir),
            vec!["{ first corrupt".to_string(), "{ second corrupt".to_string()]
        );
        let ideas: Vec<Idea> = list(dir.path());
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].title, "b");
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let dir = TempDir::new().unwrap();
        io::atomic_write(&paths::data_path(dir.path()), br#"{"projects": []}"#).unwrap();
        let all = read_all(dir.path());
        assert!(all.ideas.is_empty());
        assert!(all.productions.is_empty());
    }

    #[test]
    fn upsert_same_id_replaces_in_place() {
        let dir = TempDir::new().unwrap();
        let a = upsert(dir.path(), Idea::new("a", "")).unwrap();
        let b = upsert(dir.path(), Idea::new("b", "")).unwrap();

        let mut edited = a.clone();
        edited.title = "a2".into();
        upsert(dir.path(), edited).unwrap();

        let ideas: Vec<Idea> = list(dir.path());
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].title, "a2");
        assert_eq!(ideas[1].id, b.id);
    }

    #[test]
    fn upsert_refreshes_updated_at() {
        let dir = TempDir::new().unwrap();
        let idea = upsert(dir.path(), Idea::new("a", "")).unwrap();
        let before = idea.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        let again = upsert(dir.path(), idea).unwrap();
        assert!(again.updated_at > before);
    }

    #[test]
    fn delete_missing_id_is_noop() {
        let dir = TempDir::new().unwrap();
        upsert(dir.path(), Idea::new("keep", "")).unwrap();
        delete::<Idea>(dir.path(), Uuid::new_v4()).unwrap();
        assert_eq!(list::<Idea>(dir.path()).len(), 1);
    }

    #[test]
    fn replace_all_rejects_duplicate_ids() {
        let dir = TempDir::new().unwrap();
        let a = upsert(dir.path(), Idea::new("a", "")).unwrap();
        let err = replace_all(dir.path(), vec![a.clone(), a.clone()]).unwrap_err();
        assert!(matches!(err, BlueprintError::InvalidValue { field: "id", .. }));
        assert_eq!(list::<Idea>(dir.path()), vec![a]);
    }

    #[test]
    fn get_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(get::<Idea>(dir.path(), Uuid::new_v4()).is_none());
    }
}
