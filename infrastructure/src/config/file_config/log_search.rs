//! Log search configuration from TOML (`[log_search]` section)

use serde::{Deserialize, Serialize};
use troubleshoot_application::config::retrieval_params::{DEFAULT_INDEX, DEFAULT_SEARCH_TERM};
use troubleshoot_domain::DEFAULT_LOG_TOKEN_BUDGET;

/// Raw log search configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogSearchConfig {
    /// URL the search request is POSTed to
    pub endpoint: String,
    /// Sent verbatim as the `Cookie` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    pub search_term: String,
    pub index: String,
    /// Token budget for retrieved logs
    pub max_tokens: usize,
    pub timeout_seconds: u64,
}

impl Default for FileLogSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/search".to_string(),
            cookie: None,
            search_term: DEFAULT_SEARCH_TERM.to_string(),
            index: DEFAULT_INDEX.to_string(),
            max_tokens: DEFAULT_LOG_TOKEN_BUDGET,
            timeout_seconds: 60,
        }
    }
}
