//! Result of one agent execution.

use crate::agent::role::AgentRole;
use crate::session::entities::Message;

/// What an agent hands back to whoever invoked it.
///
/// `next_agent` becomes the session's current agent once the outcome reaches
/// the orchestration loop; `messages` are appended to the conversation in
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub next_agent: AgentRole,
    pub messages: Vec<Message>,
}

impl ExecutionOutcome {
    pub fn new(next_agent: AgentRole, messages: Vec<Message>) -> Self {
        Self {
            next_agent,
            messages,
        }
    }

    /// Outcome of a delegation: `own` messages come first, followed by
    /// everything the delegate produced. Control moves to `delegate`.
    pub fn delegated(delegate: AgentRole, own: Vec<Message>, delegated: ExecutionOutcome) -> Self {
        let mut messages = own;
        messages.extend(delegated.messages);
        Self {
            next_agent: delegate,
            messages,
        }
    }
}
