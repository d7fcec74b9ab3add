//! Infrastructure layer for troubleshoot-agent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod log_search;
pub mod providers;
pub mod tokenizer;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, FileReplConfig};
pub use log_search::HttpLogSearch;
pub use providers::OpenAiCompatibleGateway;
pub use tokenizer::TiktokenTokenizer;
