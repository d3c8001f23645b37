use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use blueprint_core::prompt::build_prompt;
use blueprint_core::types::{DocType, WizardData};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub wizard_data: WizardData,
    pub doc_type: DocType,
}

/// POST /api/generate — generate one document from a wizard answer-set.
/// Returns `{content}`; 401 when the provider rejects the credentials.
pub async fn generate_document(
    State(app): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(body) = body.map_err(AppError::rejected)?;
    let generator = app.generator.clone();
    let doc = body.doc_type;
    tracing::debug!(doc = doc.as_str(), "generation requested");
    let content = tokio::task::spawn_blocking(move || {
        let prompt = build_prompt(&body.wizard_data, doc);
        generator.generate(&prompt.instructions, &prompt.content)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(serde_json::json!({ "content": content })))
}
