//! Per-agent model configuration.

use crate::agent::role::AgentRole;
use crate::core::model::Model;
use crate::prompt::AgentInstructions;

/// Endpoint used when nothing is configured (a local Ollama server)
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1/";

/// Credential sent when the endpoint does not need one
pub const DEFAULT_CREDENTIAL: &str = "EMPTY";

/// Configuration of one agent (Value Object)
///
/// Built once per role at startup and never mutated afterwards; the
/// `with_*` methods consume the value and return a new one.
#[derive(Clone, PartialEq)]
pub struct AgentConfig {
    role: AgentRole,
    name: String,
    model: Model,
    endpoint: String,
    credential: String,
    temperature: f32,
    instructions: String,
}

impl AgentConfig {
    /// Defaults for `role`: its display name and built-in instructions
    pub fn for_role(role: AgentRole) -> Self {
        Self {
            role,
            name: role.display_name().to_string(),
            model: Model::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credential: DEFAULT_CREDENTIAL.to_string(),
            temperature: 0.0,
            instructions: AgentInstructions::for_role(role).to_string(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = credential.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    // ==================== Accessors ====================

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}

// Hand-written so the credential never ends up in logs.
impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("role", &self.role)
            .field("name", &self.name)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("credential", &"***")
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

/// One [`AgentConfig`] per role.
#[derive(Debug, Clone)]
pub struct AgentRoster {
    triage: AgentConfig,
    log_quality_check: AgentConfig,
    log_retrieval: AgentConfig,
    analysis: AgentConfig,
}

impl AgentRoster {
    /// Build a roster by applying `configure` to each role's defaults
    pub fn from_fn(mut configure: impl FnMut(AgentConfig) -> AgentConfig) -> Self {
        Self {
            triage: configure(AgentConfig::for_role(AgentRole::Triage)),
            log_quality_check: configure(AgentConfig::for_role(AgentRole::LogQualityCheck)),
            log_retrieval: configure(AgentConfig::for_role(AgentRole::LogRetrieval)),
            analysis: configure(AgentConfig::for_role(AgentRole::Analysis)),
        }
    }

    pub fn get(&self, role: AgentRole) -> &AgentConfig {
        match role {
            AgentRole::Triage => &self.triage,
            AgentRole::LogQualityCheck => &self.log_quality_check,
            AgentRole::LogRetrieval => &self.log_retrieval,
            AgentRole::Analysis => &self.analysis,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentConfig> {
        AgentRole::ALL.into_iter().map(|role| self.get(role))
    }
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self::from_fn(|config| config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_role() {
        let config = AgentConfig::for_role(AgentRole::Analysis);
        assert_eq!(config.name(), "Analysis Agent");
        assert_eq!(config.model().as_str(), "deepseek-r1:8b");
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.credential(), "EMPTY");
        assert_eq!(config.temperature(), 0.0);
        assert!(config.instructions().contains("root cause"));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let config = AgentConfig::for_role(AgentRole::Triage).with_credential("sk-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_roster_from_fn_applies_to_every_role() {
        let roster = AgentRoster::from_fn(|c| c.with_temperature(0.3));
        for role in AgentRole::ALL {
            assert_eq!(roster.get(role).role(), role);
            assert_eq!(roster.get(role).temperature(), 0.3);
        }
        assert_eq!(roster.iter().count(), 4);
    }
}
