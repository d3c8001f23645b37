use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("invalid wizard step: {0} (expected 0-4)")]
    InvalidStep(usize),

    #[error("invalid document type '{0}': expected prd or tdd")]
    InvalidDocType(String),

    #[error("select at least one document to generate")]
    NoDocumentsSelected,

    #[error("{0} has not been generated for this project")]
    DocumentMissing(String),

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error(transparent)]
    Generation(#[from] llm_client::GenerationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
