//! Token budget for retrieved log payloads.
//!
//! Retrieved logs can easily exceed a model's context window, so they are
//! cut to a fixed number of tokens before they join the conversation. The
//! cut keeps the prefix of the token stream.

use crate::core::error::DomainError;

/// Default budget for retrieved logs
pub const DEFAULT_LOG_TOKEN_BUDGET: usize = 70_000;

/// Model-specific encoding of text into token ids.
///
/// Implementations live in the infrastructure layer.
pub trait Tokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Vec<u32>;

    /// Fails when the tokens do not form valid UTF-8 (e.g. a multi-byte
    /// character split across the cut).
    fn decode(&self, tokens: &[u32]) -> Result<String, DomainError>;

    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

/// Maximum number of tokens a payload may occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    max_tokens: usize,
}

impl TokenBudget {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Truncate `text` to at most `max_tokens` tokens.
    ///
    /// Text within the budget is returned unchanged. Otherwise the first
    /// `max_tokens` tokens are decoded; if that cut splits a character, the
    /// cut moves back one token at a time until the prefix decodes.
    pub fn truncate(&self, tokenizer: &dyn Tokenizer, text: &str) -> String {
        let tokens = tokenizer.encode(text);
        if tokens.len() <= self.max_tokens {
            return text.to_string();
        }

        let mut end = self.max_tokens;
        while end > 0 {
            match tokenizer.decode(&tokens[..end]) {
                Ok(prefix) => return prefix,
                Err(_) => end -= 1,
            }
        }
        String::new()
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_TOKEN_BUDGET)
    }
}
