//! Domain layer for troubleshoot-agent
//!
//! This crate contains the core types and decision logic of the agent
//! handoff protocol. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Agents
//!
//! A conversation is routed through a closed set of [`AgentRole`]s:
//!
//! - **Triage**: extracts service name / transaction id, asks for logs
//! - **Log Quality Check**: scores supplied logs against the expected schema
//! - **Log Retrieval**: fetches logs from the log store when the user has none
//! - **Analysis**: root-cause analysis, always the end of a turn
//!
//! ## Structured output
//!
//! Each model reply is one JSON object, decoded once at the
//! [`structured`] boundary into a typed result with explicit defaults.

pub mod agent;
pub mod context;
pub mod core;
pub mod prompt;
pub mod session;
pub mod structured;
pub mod util;

// Re-export commonly used types
pub use agent::{
    config::{AgentConfig, AgentRoster, DEFAULT_CREDENTIAL, DEFAULT_ENDPOINT},
    outcome::ExecutionOutcome,
    role::AgentRole,
};
pub use context::token_budget::{DEFAULT_LOG_TOKEN_BUDGET, TokenBudget, Tokenizer};
pub use core::{error::DomainError, model::Model};
pub use prompt::{AgentInstructions, AgentReplies};
pub use session::{
    entities::{Conversation, Message, Role},
    state::{DEFAULT_GREETING, SessionState},
};
pub use structured::{
    parser::StructuredObject,
    results::{
        LOG_QUALITY_THRESHOLD, LogQualityDecision, LogQualityVerdict, RootCauseFinding,
        TriageExtraction,
    },
};
