//! Agent roles and the handoff graph between them.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The agents a conversation can be routed through.
///
/// The set is closed: every handoff an agent may perform is listed in
/// [`AgentRole::handoff_targets`], so the full transition graph can be
/// inspected (and tested) without running anything.
///
/// ```text
/// Triage ──► LogQualityCheck ──► LogRetrieval ──► Analysis
///   ▲              │                                 ▲
///   └──────────────┴─────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Entry point: extracts service name / transaction id from the chat
    #[default]
    Triage,
    /// Scores whether the supplied logs follow the expected schema
    LogQualityCheck,
    /// Pulls logs from the log store when the user has none
    LogRetrieval,
    /// Root-cause analysis over everything collected so far
    Analysis,
}

impl AgentRole {
    pub const ALL: [AgentRole; 4] = [
        AgentRole::Triage,
        AgentRole::LogQualityCheck,
        AgentRole::LogRetrieval,
        AgentRole::Analysis,
    ];

    /// Configuration key (`[agents.<key>]`)
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Triage => "triage",
            AgentRole::LogQualityCheck => "log_quality_check",
            AgentRole::LogRetrieval => "log_retrieval",
            AgentRole::Analysis => "analysis",
        }
    }

    /// Human-readable agent name
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentRole::Triage => "Triage Agent",
            AgentRole::LogQualityCheck => "Log Checker Agent",
            AgentRole::LogRetrieval => "Log Retriever Agent",
            AgentRole::Analysis => "Analysis Agent",
        }
    }

    /// Agents this role may name as the next agent (itself included where
    /// it can stay in control).
    pub fn handoff_targets(&self) -> &'static [AgentRole] {
        match self {
            AgentRole::Triage => &[AgentRole::Triage, AgentRole::LogQualityCheck],
            AgentRole::LogQualityCheck => &[
                AgentRole::LogQualityCheck,
                AgentRole::Triage,
                AgentRole::LogRetrieval,
                AgentRole::Analysis,
            ],
            AgentRole::LogRetrieval => &[AgentRole::Analysis],
            AgentRole::Analysis => &[AgentRole::Analysis],
        }
    }

    pub fn can_hand_off_to(&self, target: AgentRole) -> bool {
        self.handoff_targets().contains(&target)
    }

    /// Whether a turn handled by this role always ends with the role itself
    pub fn is_terminal(&self) -> bool {
        matches!(self.handoff_targets(), [only] if only == self)
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for AgentRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "triage" => Ok(AgentRole::Triage),
            "log_quality_check" | "log_checker" | "logchecker" => Ok(AgentRole::LogQualityCheck),
            "log_retrieval" | "log_retriever" | "logretriever" => Ok(AgentRole::LogRetrieval),
            "analysis" => Ok(AgentRole::Analysis),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_role_is_triage() {
        assert_eq!(AgentRole::default(), AgentRole::Triage);
    }

    #[test]
    fn test_role_key_roundtrip() {
        for role in AgentRole::ALL {
            let parsed: AgentRole = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(matches!(
            "billing".parse::<AgentRole>(),
            Err(DomainError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_handoff_graph() {
        assert!(AgentRole::Triage.can_hand_off_to(AgentRole::LogQualityCheck));
        assert!(!AgentRole::Triage.can_hand_off_to(AgentRole::Analysis));
        assert!(AgentRole::LogQualityCheck.can_hand_off_to(AgentRole::Triage));
        assert!(AgentRole::LogQualityCheck.can_hand_off_to(AgentRole::LogRetrieval));
        assert!(AgentRole::LogRetrieval.can_hand_off_to(AgentRole::Analysis));
        assert!(!AgentRole::LogRetrieval.can_hand_off_to(AgentRole::LogRetrieval));
    }

    #[test]
    fn test_only_analysis_is_terminal() {
        let terminal: Vec<_> = AgentRole::ALL
            .into_iter()
            .filter(|r| r.is_terminal())
            .collect();
        assert_eq!(terminal, vec![AgentRole::Analysis]);
    }

    #[test]
    fn test_every_role_reaches_analysis() {
        // Walk the graph from triage; analysis must be reachable
        let mut seen = vec![AgentRole::Triage];
        let mut frontier = vec![AgentRole::Triage];
        while let Some(role) = frontier.pop() {
            for next in role.handoff_targets() {
                if !seen.contains(next) {
                    seen.push(*next);
                    frontier.push(*next);
                }
            }
        }
        assert_eq!(seen.len(), AgentRole::ALL.len());
    }
}
