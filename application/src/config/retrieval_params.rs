//! Retrieval parameters for the log retrieval agent.
//!
//! The search term and index are fixed configuration, not derived from the
//! conversation.

use crate::ports::log_search::LogQuery;
use troubleshoot_domain::TokenBudget;

/// Search term used when nothing is configured
pub const DEFAULT_SEARCH_TERM: &str = "DGPS241129073313898785093";

/// Log index used when nothing is configured
pub const DEFAULT_INDEX: &str = "test_index_01";

/// Log retrieval parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalParams {
    /// Query sent to the log store
    pub query: LogQuery,
    /// Token budget for the serialized result
    pub budget: TokenBudget,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            query: LogQuery::new(DEFAULT_SEARCH_TERM, DEFAULT_INDEX),
            budget: TokenBudget::default(),
        }
    }
}

impl RetrievalParams {
    // ==================== Builder Methods ====================

    pub fn with_query(mut self, query: LogQuery) -> Self {
        self.query = query;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.budget = TokenBudget::new(max_tokens);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RetrievalParams::default();
        assert_eq!(params.query.search_term, DEFAULT_SEARCH_TERM);
        assert_eq!(params.query.index, DEFAULT_INDEX);
        assert_eq!(params.budget.max_tokens(), 70_000);
    }

    #[test]
    fn test_builder_overrides() {
        let params = RetrievalParams::default()
            .with_query(LogQuery::new("TX9", "prod"))
            .with_max_tokens(100);
        assert_eq!(params.query, LogQuery::new("TX9", "prod"));
        assert_eq!(params.budget.max_tokens(), 100);
    }
}
