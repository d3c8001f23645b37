//! `llm-client` — a small blocking driver for OpenAI-compatible Responses
//! APIs, used by `blueprint` to turn an assembled prompt into a document.
//!
//! # Architecture
//!
//! ```text
//! ClientConfig
//!     │
//!     ▼
//! ResponsesClient   ← POST {base_url}/responses, bearer auth
//!     │                one attempt per call, no streaming
//!     ▼
//! ResponsesReply    ← `output_text` or the joined `output[].content[]` text
//!     │
//!     ▼
//! String | GenerationError::{Unauthorized, EmptyOutput, Provider}
//! ```
//!
//! Callers depend on the [`TextGenerator`] trait rather than the concrete
//! client so the wizard can be driven by a scripted generator in tests.
//!
//! ```rust,ignore
//! use llm_client::{ClientConfig, ResponsesClient, TextGenerator};
//!
//! let client = ResponsesClient::new(ClientConfig::default());
//! let text = client.generate("You are a product manager.", "Write a PRD.")?;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientConfig, ResponsesClient};
pub use error::GenerationError;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Anything that can turn an instructions/content pair into text.
///
/// Implementations perform a single attempt; retries are the caller's call.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, instructions: &str, content: &str) -> Result<String>;
}
