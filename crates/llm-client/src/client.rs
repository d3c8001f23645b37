use std::time::Duration;

use crate::types::{ErrorEnvelope, ResponsesReply, ResponsesRequest};
use crate::{GenerationError, Result, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-5.2-2025-12-11";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Per-request ceiling; a long PRD can take minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

// ─── ClientConfig ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root without the trailing `/responses`.
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

// ─── ResponsesClient ──────────────────────────────────────────────────────

/// Single-shot client for `POST {base_url}/responses`.
///
/// The underlying blocking HTTP client is built per call, so a
/// `ResponsesClient` can be created and dropped anywhere, including inside an
/// async runtime. Calls themselves must run on a blocking-capable thread.
#[derive(Debug, Clone)]
pub struct ResponsesClient {
    config: ClientConfig,
}

impl ResponsesClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.config.base_url.trim_end_matches('/'))
    }
}

impl TextGenerator for ResponsesClient {
    fn generate(&self, instructions: &str, content: &str) -> Result<String> {
        let Some(api_key) = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
        else {
            return Err(GenerationError::Unauthorized(
                "API key not configured: set the provider API key environment variable".into(),
            ));
        };

        let http = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| GenerationError::Provider(format!("failed to build HTTP client: {e}")))?;

        let url = self.endpoint();
        let body = ResponsesRequest {
            model: &self.config.model,
            instructions,
            input: content,
            temperature: self.config.temperature,
        };
        tracing::debug!(model = %self.config.model, %url, "sending generation request");

        let response = http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                tracing::warn!(error = %e, "generation request failed");
                GenerationError::Provider(format!("generation request failed: {e}"))
            })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| GenerationError::Provider(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let error = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .map(|env| env.error);
            let kind = error.as_ref().and_then(|e| e.kind.clone());
            let message = error
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("provider returned {status}"));
            tracing::warn!(
                status = status.as_u16(),
                kind = kind.as_deref().unwrap_or("unknown"),
                %message,
                "provider rejected generation"
            );
            return Err(GenerationError::classify(Some(status.as_u16()), message));
        }

        let reply: ResponsesReply = serde_json::from_str(&text)
            .map_err(|e| GenerationError::Provider(format!("malformed provider response: {e}")))?;
        reply.text().ok_or(GenerationError::EmptyOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server, key: Option<&str>) -> ResponsesClient {
        ResponsesClient::new(ClientConfig {
            base_url: server.url(),
            api_key: key.map(str::to_string),
            model: "test-model".into(),
            ..Default::default()
        })
    }

    #[test]
    fn generate_returns_output_text() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/responses")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "test-model",
                "instructions": "be a PM",
                "input": "make a PRD",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r##"{"output": [{"type": "message", "content": [{"type": "output_text", "text": "# PRD: Demo"}]}]}"##,
            )
            .create();

        let client = client_for(&server, Some("sk-test"));
        let text = client.generate("be a PM", "make a PRD").unwrap();
        assert_eq!(text, "# PRD: Demo");
        mock.assert();
    }

    #[test]
    fn generate_without_key_is_unauthorized() {
        let server = mockito::Server::new();
        let client = client_for(&server, None);
        let err = client.generate("a", "b").unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn generate_401_is_unauthorized() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/responses")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#)
            .create();

        let err = client_for(&server, Some("sk-bad")).generate("a", "b").unwrap_err();
        assert_eq!(
            err,
            GenerationError::Unauthorized("Incorrect API key provided".into())
        );
    }

    #[test]
    fn generate_500_is_provider_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/responses")
            .with_status(500)
            .with_body(r#"{"error": {"message": "The server had an error while processing your request."}}"#)
            .create();

        let err = client_for(&server, Some("sk-test")).generate("a", "b").unwrap_err();
        assert!(matches!(err, GenerationError::Provider(ref m) if m.contains("server had an error")));
    }

    #[test]
    fn generate_empty_output_is_classified() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/responses")
            .with_status(200)
            .with_body(r#"{"output": []}"#)
            .create();

        let err = client_for(&server, Some("sk-test")).generate("a", "b").unwrap_err();
        assert_eq!(err, GenerationError::EmptyOutput);
    }

    #[test]
    fn generate_malformed_body_is_provider_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/responses")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create();

        let err = client_for(&server, Some("sk-test")).generate("a", "b").unwrap_err();
        assert!(matches!(err, GenerationError::Provider(_)));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = ResponsesClient::new(ClientConfig {
            base_url: "http://localhost:9000/v1/".into(),
            ..Default::default()
        });
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/responses");
    }
}
