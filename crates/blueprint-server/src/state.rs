use blueprint_core::config::Config;
use llm_client::{ResponsesClient, TextGenerator};
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    /// State backed by the Responses API client described in
    /// `.blueprint/config.yaml`. An unreadable config falls back to defaults.
    pub fn new(root: PathBuf) -> Self {
        let config = Config::load(&root).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load config; using defaults");
            Config::default()
        });
        let client = ResponsesClient::new(config.generation.client_config());
        Self::with_generator(root, Arc::new(client))
    }

    pub fn with_generator(root: PathBuf, generator: Arc<dyn TextGenerator>) -> Self {
        Self { root, generator }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_stores_root() {
        let state = AppState::new(PathBuf::from("/tmp/blueprint-test"));
        assert_eq!(state.root, PathBuf::from("/tmp/blueprint-test"));
    }
}
