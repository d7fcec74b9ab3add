//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and application
//! types once validated.

mod agents;
mod llm;
mod log_search;
mod repl;
mod session;

pub use agents::{FileAgentOverride, FileAgentsConfig};
pub use llm::FileLlmConfig;
pub use log_search::FileLogSearchConfig;
pub use repl::FileReplConfig;
pub use session::FileSessionConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use troubleshoot_application::ports::log_search::LogQuery;
use troubleshoot_application::RetrievalParams;
use troubleshoot_domain::{AgentConfig, AgentRole, AgentRoster, Model, TokenBudget};

/// Configuration validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("{section}.timeout_seconds cannot be 0")]
    InvalidTimeout { section: &'static str },

    #[error("model name cannot be empty ({field})")]
    EmptyModelName { field: String },

    #[error("log_search.max_tokens cannot be 0")]
    ZeroTokenBudget,

    #[error("temperature must be between 0 and 2 ({field}: {value})")]
    InvalidTemperature { field: String, value: f32 },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model endpoint shared by all agents
    pub llm: FileLlmConfig,
    /// Per-agent model overrides
    pub agents: FileAgentsConfig,
    /// Log store access and token budget
    pub log_search: FileLogSearchConfig,
    /// Session settings
    pub session: FileSessionConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.llm.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout { section: "llm" });
        }
        if self.log_search.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                section: "log_search",
            });
        }
        if self.log_search.max_tokens == 0 {
            return Err(ConfigValidationError::ZeroTokenBudget);
        }

        check_model("llm.model", &self.llm.model)?;
        check_temperature("llm.temperature", self.llm.temperature)?;

        for role in AgentRole::ALL {
            let agent = self.agents.get(role);
            if let Some(model) = &agent.model {
                check_model(&format!("agents.{}.model", role.as_str()), model)?;
            }
            if let Some(temperature) = agent.temperature {
                check_temperature(&format!("agents.{}.temperature", role.as_str()), temperature)?;
            }
        }

        Ok(())
    }

    /// Build the per-agent model configuration.
    ///
    /// Every agent talks to `[llm]` with the resolved API key; `[agents.*]`
    /// entries override model and temperature.
    pub fn agent_roster(&self) -> Result<AgentRoster, ConfigValidationError> {
        self.validate()?;

        let default_model = parse_model("llm.model", &self.llm.model)?;
        let credential = self.llm.resolve_api_key();

        let mut models = Vec::with_capacity(AgentRole::ALL.len());
        for role in AgentRole::ALL {
            let agent = self.agents.get(role);
            let model = match &agent.model {
                Some(name) => parse_model(&format!("agents.{}.model", role.as_str()), name)?,
                None => default_model.clone(),
            };
            models.push((role, model, agent.temperature.unwrap_or(self.llm.temperature)));
        }

        Ok(AgentRoster::from_fn(|config: AgentConfig| {
            let (model, temperature) = models
                .iter()
                .find(|(role, _, _)| *role == config.role())
                .map(|(_, model, temperature)| (model.clone(), *temperature))
                .unwrap_or_else(|| (default_model.clone(), self.llm.temperature));
            config
                .with_endpoint(self.llm.base_url.clone())
                .with_credential(credential.clone())
                .with_model(model)
                .with_temperature(temperature)
        }))
    }

    /// What log retrieval searches for and how much it keeps
    pub fn retrieval_params(&self) -> RetrievalParams {
        RetrievalParams {
            query: LogQuery::new(&self.log_search.search_term, &self.log_search.index),
            budget: TokenBudget::new(self.log_search.max_tokens),
        }
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_seconds)
    }

    pub fn log_search_timeout(&self) -> Duration {
        Duration::from_secs(self.log_search.timeout_seconds)
    }
}

fn check_model(field: &str, name: &str) -> Result<(), ConfigValidationError> {
    parse_model(field, name).map(|_| ())
}

fn parse_model(field: &str, name: &str) -> Result<Model, ConfigValidationError> {
    Model::new(name.trim()).map_err(|_| ConfigValidationError::EmptyModelName {
        field: field.to_string(),
    })
}

fn check_temperature(field: &str, value: f32) -> Result<(), ConfigValidationError> {
    if (0.0..=2.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigValidationError::InvalidTemperature {
            field: field.to_string(),
            value,
        })
    }
}
