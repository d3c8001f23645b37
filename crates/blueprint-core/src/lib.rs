pub mod config;
pub mod draft;
pub mod error;
pub mod idea;
pub mod io;
pub mod paths;
pub mod production;
pub mod project;
pub mod prompt;
pub mod store;
pub mod template;
pub mod types;
pub mod wizard;

pub use error::{BlueprintError, Result};
