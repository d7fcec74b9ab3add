//! Context sent to models.
//!
//! - [`token_budget::TokenBudget`]: caps how many tokens of retrieved logs
//!   enter the conversation

pub mod token_budget;
