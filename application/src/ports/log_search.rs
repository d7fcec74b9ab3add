//! Log search port
//!
//! Defines the interface to the external log store.

use async_trait::async_trait;
use serde_json::Value;

/// A search against the log store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub search_term: String,
    pub index: String,
}

impl LogQuery {
    pub fn new(search_term: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            index: index.into(),
        }
    }
}

/// Outcome of a log search.
///
/// A failure is opaque text: it is passed on to the analysis exactly like
/// real log content.
#[derive(Debug, Clone, PartialEq)]
pub enum LogSearchResult {
    Records(Vec<Value>),
    Failure(String),
}

impl LogSearchResult {
    /// JSON text of the result. Records become a JSON array; a failure
    /// becomes a JSON string literal.
    pub fn to_payload(&self) -> String {
        let value = match self {
            LogSearchResult::Records(records) => Value::Array(records.clone()),
            LogSearchResult::Failure(text) => Value::String(text.clone()),
        };
        value.to_string()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LogSearchResult::Failure(_))
    }
}

/// Port for the external log store
#[async_trait]
pub trait LogSearchPort: Send + Sync {
    /// Run `query` once. Never fails: transport and HTTP errors are
    /// reported as [`LogSearchResult::Failure`].
    async fn search(&self, query: &LogQuery) -> LogSearchResult;
}
