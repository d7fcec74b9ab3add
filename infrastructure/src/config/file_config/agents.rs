//! Per-agent overrides from TOML (`[agents.<role>]` sections)

use serde::{Deserialize, Serialize};
use troubleshoot_domain::AgentRole;

/// Model settings for one agent; unset fields fall back to `[llm]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Raw per-agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agents.analysis]
/// model = "qwen2.5:32b"
/// temperature = 0.2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    pub triage: FileAgentOverride,
    pub log_quality_check: FileAgentOverride,
    pub log_retrieval: FileAgentOverride,
    pub analysis: FileAgentOverride,
}

impl FileAgentsConfig {
    pub fn get(&self, role: AgentRole) -> &FileAgentOverride {
        match role {
            AgentRole::Triage => &self.triage,
            AgentRole::LogQualityCheck => &self.log_quality_check,
            AgentRole::LogRetrieval => &self.log_retrieval,
            AgentRole::Analysis => &self.analysis,
        }
    }
}
