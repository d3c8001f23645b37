use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blueprint_core::error::BlueprintError;
use llm_client::GenerationError;

// ---------------------------------------------------------------------------
// Sentinel
// ---------------------------------------------------------------------------

/// Carries an explicit HTTP 400 through the `anyhow::Error` chain.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses. The body is always `{"error": msg}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    /// A request body the `Json` extractor refused.
    pub fn rejected(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

fn generation_status(e: &GenerationError) -> StatusCode {
    if e.is_unauthorized() {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.downcast_ref::<BadRequestError>().is_some() {
            StatusCode::BAD_REQUEST
        } else if let Some(e) = self.0.downcast_ref::<GenerationError>() {
            generation_status(e)
        } else if let Some(e) = self.0.downcast_ref::<BlueprintError>() {
            match e {
                BlueprintError::InvalidStep(_)
                | BlueprintError::InvalidDocType(_)
                | BlueprintError::NoDocumentsSelected
                | BlueprintError::InvalidValue { .. } => StatusCode::BAD_REQUEST,
                BlueprintError::DocumentMissing(_) => StatusCode::NOT_FOUND,
                BlueprintError::Generation(g) => generation_status(g),
                BlueprintError::Io(_) | BlueprintError::Yaml(_) | BlueprintError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::warn!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn bad_request_constructor_maps_to_400() {
        assert_eq!(status_of(AppError::bad_request("id required")), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_document_maps_to_404() {
        let err = AppError(BlueprintError::DocumentMissing("PRD".into()).into());
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unauthorized_generation_maps_to_401() {
        let err = AppError(GenerationError::Unauthorized("Invalid API key".into()).into());
        assert_eq!(status_of(err), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn wrapped_unauthorized_maps_to_401() {
        let inner = GenerationError::Unauthorized("missing key".into());
        let err = AppError(BlueprintError::Generation(inner).into());
        assert_eq!(status_of(err), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn empty_output_maps_to_500() {
        let err = AppError(GenerationError::EmptyOutput.into());
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn provider_error_maps_to_500() {
        let err = AppError(GenerationError::Provider("upstream 502".into()).into());
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_value_maps_to_400() {
        let err = AppError(
            BlueprintError::InvalidValue {
                field: "status",
                value: "gone".into(),
            }
            .into(),
        );
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_error_maps_to_500() {
        let err = AppError(BlueprintError::Io(std::io::Error::other("disk full")).into());
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_body_is_json() {
        let response = AppError::bad_request("id required").into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
