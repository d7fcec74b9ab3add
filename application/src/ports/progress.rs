//! Progress notification port
//!
//! Defines the interface for reporting progress while a turn runs through
//! one or more agents.

use crate::ports::log_search::LogQuery;
use troubleshoot_domain::AgentRole;

/// Callback for progress updates during a turn
///
/// Implementations live in the presentation layer (spinner, plain log, ...).
pub trait TurnProgressNotifier: Send + Sync {
    /// Called when an agent starts working on the conversation
    fn on_agent_start(&self, role: AgentRole);

    /// Called when control passes from one agent to another
    fn on_handoff(&self, from: AgentRole, to: AgentRole);

    /// Called when the turn finishes; `next` is the agent for the next turn
    fn on_turn_complete(&self, next: AgentRole);

    /// Called before the log store is queried
    fn on_log_search(&self, _query: &LogQuery) {}

    /// Called when the turn ends in an error
    fn on_turn_failed(&self, _role: AgentRole) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoTurnProgress;

impl TurnProgressNotifier for NoTurnProgress {
    fn on_agent_start(&self, _role: AgentRole) {}
    fn on_handoff(&self, _from: AgentRole, _to: AgentRole) {}
    fn on_turn_complete(&self, _next: AgentRole) {}
}
