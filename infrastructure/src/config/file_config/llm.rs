//! Model endpoint configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};
use troubleshoot_domain::{DEFAULT_CREDENTIAL, DEFAULT_ENDPOINT, Model};

/// Raw model endpoint configuration from TOML
///
/// # Example
///
/// ```toml
/// [llm]
/// base_url = "http://localhost:11434/v1/"
/// model = "deepseek-r1:8b"
/// api_key_env = "TROUBLESHOOT_API_KEY"   # checked first
/// temperature = 0.0
/// timeout_seconds = 120
/// accept_invalid_certs = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// OpenAI-compatible base URL (`/chat/completions` is appended)
    pub base_url: String,
    /// Default model for every agent
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// API key used when the environment variable is unset
    pub api_key: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
    /// Skip TLS certificate verification (self-signed inference servers)
    pub accept_invalid_certs: bool,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
            model: Model::DEFAULT.to_string(),
            api_key_env: "TROUBLESHOOT_API_KEY".to_string(),
            api_key: DEFAULT_CREDENTIAL.to_string(),
            temperature: 0.0,
            timeout_seconds: 120,
            accept_invalid_certs: false,
        }
    }
}

impl FileLlmConfig {
    /// The API key: `$api_key_env` when set and non-empty, else `api_key`
    pub fn resolve_api_key(&self) -> String {
        if !self.api_key_env.is_empty()
            && let Ok(key) = std::env::var(&self.api_key_env)
            && !key.is_empty()
        {
            return key;
        }
        self.api_key.clone()
    }
}
