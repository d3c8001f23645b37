//! Ideas — freeform notes kept in a user-chosen order.
//!
//! Unlike the other collections, the stored order of ideas is meaningful:
//! `reorder` replaces the whole list with the caller's sequence.

use crate::error::Result;
use crate::store::{self, Collections, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Idea {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Idea {
    const COLLECTION: &'static str = "ideas";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.ideas
    }
}

pub fn list(root: &Path) -> Vec<Idea> {
    store::list(root)
}

pub fn get(root: &Path, id: Uuid) -> Option<Idea> {
    store::get(root, id)
}

pub fn upsert(root: &Path, idea: Idea) -> Result<Idea> {
    store::upsert(root, idea)
}

pub fn delete(root: &Path, id: Uuid) -> Result<()> {
    store::delete::<Idea>(root, id)
}

pub fn create(root: &Path, title: impl Into<String>, content: impl Into<String>) -> Result<Idea> {
    store::upsert(root, Idea::new(title, content))
}

/// Replace the stored ideas with `ideas`, in exactly the given order.
pub fn reorder(root: &Path, ideas: Vec<Idea>) -> Result<Vec<Idea>> {
    store::replace_all(root, ideas)
}

/// Move one idea to `position` (clamped to the end of the list).
/// Returns `None` when no idea has `id`.
pub fn move_to(root: &Path, id: Uuid, position: usize) -> Result<Option<Vec<Idea>>> {
    let mut ideas = list(root);
    let Some(from) = ideas.iter().position(|i| i.id == id) else {
        return Ok(None);
    };
    let idea = ideas.remove(from);
    let to = position.min(ideas.len());
    ideas.insert(to, idea);
    reorder(root, ideas).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(dir: &TempDir) -> Vec<Idea> {
        ["one", "two", "three"]
            .iter()
            .map(|t| create(dir.path(), *t, "").unwrap())
            .collect()
    }

    #[test]
    fn reorder_then_list_returns_given_sequence() {
        let dir = TempDir::new().unwrap();
        let ideas = seed(&dir);
        let reversed: Vec<Idea> = ideas.iter().rev().cloned().collect();

        reorder(dir.path(), reversed.clone()).unwrap();
        assert_eq!(list(dir.path()), reversed);
    }

    #[test]
    fn move_to_front() {
        let dir = TempDir::new().unwrap();
        let ideas = seed(&dir);
        let moved = move_to(dir.path(), ideas[2].id, 0).unwrap().unwrap();
        let titles: Vec<&str> = moved.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["three", "one", "two"]);
        assert_eq!(list(dir.path()), moved);
    }

    #[test]
    fn move_past_end_clamps() {
        let dir = TempDir::new().unwrap();
        let ideas = seed(&dir);
        let moved = move_to(dir.path(), ideas[0].id, 99).unwrap().unwrap();
        assert_eq!(moved.last().unwrap().id, ideas[0].id);
    }

    #[test]
    fn move_unknown_is_none() {
        let dir = TempDir::new().unwrap();
        seed(&dir);
        assert!(move_to(dir.path(), Uuid::new_v4(), 0).unwrap().is_none());
    }

    #[test]
    fn edit_refreshes_updated_at_only() {
        let dir = TempDir::new().unwrap();
        let idea = create(dir.path(), "t", "c").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let mut edited = idea.clone();
        edited.content = "changed".into();
        let stored = upsert(dir.path(), edited).unwrap();
        assert_eq!(stored.created_at, idea.created_at);
        assert!(stored.updated_at > idea.updated_at);
    }
}
