//! BPE tokenizer backed by `tiktoken-rs` (`o200k_base` encoding).

use tiktoken_rs::CoreBPE;
use troubleshoot_domain::{DomainError, Tokenizer};

/// `o200k_base` tokenizer used to size retrieved logs
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    /// Load the `o200k_base` ranks (bundled with the crate, no network)
    pub fn o200k_base() -> Result<Self, DomainError> {
        let bpe = tiktoken_rs::o200k_base().map_err(|e| DomainError::Tokenizer(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe.encode_with_special_tokens(text)
    }

    fn decode(&self, tokens: &[u32]) -> Result<String, DomainError> {
        self.bpe
            .decode(tokens.to_vec())
            .map_err(|e| DomainError::Tokenizer(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use troubleshoot_domain::TokenBudget;

    fn tokenizer() -> TiktokenTokenizer {
        TiktokenTokenizer::o200k_base().unwrap()
    }

    #[test]
    fn test_encode_decode_plain_text() {
        let tokenizer = tokenizer();
        let text = "ExceptionInfo.transactionId=DGPS241129073313898785093";
        let tokens = tokenizer.encode(text);
        assert!(!tokens.is_empty());
        assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
    }

    #[test]
    fn test_short_payload_is_unchanged() {
        let tokenizer = tokenizer();
        let payload = r#"[{"level":"ERROR","message":"timeout"}]"#;
        assert_eq!(TokenBudget::default().truncate(&tokenizer, payload), payload);
    }

    #[test]
    fn test_long_payload_is_cut_to_budget() {
        let tokenizer = tokenizer();
        let payload = "error 503 from downstream service ".repeat(20_000);
        assert!(tokenizer.count(&payload) > 70_000);

        let truncated = TokenBudget::default().truncate(&tokenizer, &payload);

        assert!(tokenizer.count(&truncated) <= 70_000);
        assert!(payload.starts_with(&truncated));
        assert!(truncated.len() < payload.len());
        assert_eq!(TokenBudget::default().truncate(&tokenizer, &truncated), truncated);
    }

    #[test]
    fn test_cut_inside_multibyte_text_still_decodes() {
        let tokenizer = tokenizer();
        let payload = "障害が発生しました。".repeat(50);

        let truncated = TokenBudget::new(7).truncate(&tokenizer, &payload);

        assert!(!truncated.is_empty());
        assert!(payload.starts_with(&truncated));
    }
}
