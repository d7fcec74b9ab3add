//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use thiserror::Error;
use troubleshoot_domain::{AgentConfig, Message};

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model returned no content")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `messages` to the model described by `agent` and return the raw
    /// reply text.
    ///
    /// Implementations must request JSON-object output and use the agent's
    /// model, endpoint, credential and temperature. The call is attempted
    /// once; there are no retries.
    async fn complete_json(
        &self,
        agent: &AgentConfig,
        messages: &[Message],
    ) -> Result<String, GatewayError>;
}
