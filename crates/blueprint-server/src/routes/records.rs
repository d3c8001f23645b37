//! One CRUD shape shared by every collection:
//!
//! - `GET /api/<collection>` lists, `GET ?id=` fetches one or returns `null`
//! - `POST` upserts the body and echoes the stored record
//! - `DELETE ?id=` removes, succeeding even when nothing matched

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use blueprint_core::idea::{self, Idea};
use blueprint_core::store::{self, Record};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

// An id that is not a UUID cannot match any record.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// GET /api/<collection>[?id=]
pub async fn fetch<T: Record + Send + 'static>(
    State(app): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || match query.id {
        Some(raw) => {
            let record = parse_id(&raw).and_then(|id| store::get::<T>(&root, id));
            serde_json::to_value(record)
        }
        None => serde_json::to_value(store::list::<T>(&root)),
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// Write
// ---------------------------------------------------------------------------

/// POST /api/<collection>
pub async fn upsert<T: Record + Send + 'static>(
    State(app): State<AppState>,
    body: Result<Json<T>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(record) = body.map_err(AppError::rejected)?;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let stored = store::upsert(&root, record)?;
        Ok::<_, anyhow::Error>(serde_json::to_value(stored)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdeasBody {
    Reorder(Vec<Idea>),
    One(Idea),
}

/// POST /api/ideas — a single idea upserts; an array replaces the whole
/// collection in the given order.
pub async fn upsert_ideas(
    State(app): State<AppState>,
    body: Result<Json<IdeasBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(body) = body.map_err(AppError::rejected)?;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let value = match body {
            IdeasBody::Reorder(ideas) => serde_json::to_value(idea::reorder(&root, ideas)?)?,
            IdeasBody::One(one) => serde_json::to_value(idea::upsert(&root, one)?)?,
        };
        Ok::<_, anyhow::Error>(value)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(result))
}

/// DELETE /api/<collection>?id=
pub async fn remove<T: Record + Send + 'static>(
    State(app): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(raw) = query.id.filter(|id| !id.trim().is_empty()) else {
        return Err(AppError::bad_request("id required"));
    };
    let root = app.root.clone();
    tokio::task::spawn_blocking(move || match parse_id(&raw) {
        Some(id) => store::delete::<T>(&root, id),
        None => Ok(()),
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::project::{self, Project};
    use llm_client::GenerationError;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Unused;

    impl llm_client::TextGenerator for Unused {
        fn generate(&self, _: &str, _: &str) -> llm_client::Result<String> {
            Err(GenerationError::EmptyOutput)
        }
    }

    fn state(dir: &TempDir) -> AppState {
        AppState::with_generator(dir.path().to_path_buf(), Arc::new(Unused))
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_none());
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&format!(" {id} ")), Some(id));
    }

    #[tokio::test]
    async fn fetch_unknown_id_is_null() {
        let dir = TempDir::new().unwrap();
        let query = IdQuery {
            id: Some(Uuid::new_v4().to_string()),
        };
        let Json(value) = fetch::<Project>(State(state(&dir)), Query(query))
            .await
            .unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn fetch_by_id_returns_record() {
        let dir = TempDir::new().unwrap();
        let p = project::create_empty(dir.path()).unwrap();
        let query = IdQuery {
            id: Some(p.id.to_string()),
        };
        let Json(value) = fetch::<Project>(State(state(&dir)), Query(query))
            .await
            .unwrap();
        assert_eq!(value["id"], p.id.to_string());
    }

    #[tokio::test]
    async fn remove_without_id_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let err = remove::<Project>(State(state(&dir)), Query(IdQuery::default()))
            .await
            .unwrap_err();
        assert!(err.0.to_string().contains("id required"));
    }

    #[tokio::test]
    async fn remove_garbage_id_is_ok() {
        let dir = TempDir::new().unwrap();
        let query = IdQuery {
            id: Some("nope".into()),
        };
        let Json(value) = remove::<Project>(State(state(&dir)), Query(query))
            .await
            .unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn ideas_body_prefers_array() {
        let body: IdeasBody = serde_json::from_str(r#"[{"title": "a"}, {"title": "b"}]"#).unwrap();
        assert!(matches!(body, IdeasBody::Reorder(ref v) if v.len() == 2));
        let body: IdeasBody = serde_json::from_str(r#"{"title": "a"}"#).unwrap();
        assert!(matches!(body, IdeasBody::One(_)));
    }
}
