//! OpenAI-compatible chat completions gateway
//!
//! Speaks the `/chat/completions` dialect served by OpenAI, vLLM, Ollama and
//! most self-hosted inference servers. Every request asks for a JSON object
//! reply (`response_format: {"type": "json_object"}`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use troubleshoot_application::ports::llm_gateway::{GatewayError, LlmGateway};
use troubleshoot_domain::{AgentConfig, Message};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Gateway to any OpenAI-compatible chat completions endpoint.
///
/// The endpoint, credential, model and temperature come from the
/// [`AgentConfig`] of each call, so one gateway serves every agent.
pub struct OpenAiCompatibleGateway {
    client: reqwest::Client,
}

impl OpenAiCompatibleGateway {
    /// Build a gateway whose requests time out after `timeout`.
    ///
    /// `accept_invalid_certs` disables TLS certificate verification, for
    /// internal inference servers with self-signed certificates.
    pub fn new(timeout: Duration, accept_invalid_certs: bool) -> Result<Self, GatewayError> {
        if accept_invalid_certs {
            warn!("TLS certificate verification is disabled for the LLM endpoint");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn completions_url(endpoint: &str) -> String {
        format!("{}/chat/completions", endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete_json(
        &self,
        agent: &AgentConfig,
        messages: &[Message],
    ) -> Result<String, GatewayError> {
        let url = Self::completions_url(agent.endpoint());
        let body = ChatCompletionRequest {
            model: agent.model().as_str(),
            messages,
            temperature: agent.temperature(),
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!(url = %url, model = %agent.model(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(agent.credential())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GatewayError::EmptyResponse)
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}
