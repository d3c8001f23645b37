use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The provider rejected our credentials, or none were configured.
    #[error("{0}")]
    Unauthorized(String),

    #[error("No content generated")]
    EmptyOutput,

    /// Network, server-side, or malformed-response failure.
    #[error("{0}")]
    Provider(String),
}

impl GenerationError {
    /// Classify a provider failure from its HTTP status (if any) and message.
    pub fn classify(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        let auth_status = matches!(status, Some(401) | Some(403));
        if auth_status || lower.contains("api key") || lower.contains("auth") {
            GenerationError::Unauthorized(message)
        } else {
            GenerationError::Provider(message)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GenerationError::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_is_unauthorized() {
        let err = GenerationError::classify(Some(401), "nope");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn api_key_message_is_unauthorized() {
        let err = GenerationError::classify(Some(400), "Incorrect API key provided: sk-***");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn server_error_is_provider() {
        let err = GenerationError::classify(Some(500), "The server had an error");
        assert_eq!(
            err,
            GenerationError::Provider("The server had an error".to_string())
        );
    }

    #[test]
    fn network_failure_is_provider() {
        let err = GenerationError::classify(None, "connection refused");
        assert!(!err.is_unauthorized());
    }
}
