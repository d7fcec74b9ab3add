//! Application layer for troubleshoot-agent
//!
//! This crate contains the agent use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RetrievalParams;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway},
    log_search::{LogQuery, LogSearchPort, LogSearchResult},
    progress::{NoTurnProgress, TurnProgressNotifier},
};
pub use use_cases::execute_agent::{AgentError, ExecuteAgentUseCase};
pub use use_cases::run_turn::{RunTurnError, RunTurnUseCase, TurnOutput};
