//! Cross-turn session state.

use crate::agent::outcome::ExecutionOutcome;
use crate::agent::role::AgentRole;
use crate::session::entities::{Conversation, Message};

/// Greeting that opens every new session
pub const DEFAULT_GREETING: &str = "Hello, I am a troubleshooting agent. How may I assist you today?\n\n As a start, please provide the **ITOC WA chat and sample logs**.";

/// Conversation history plus the agent currently in control.
///
/// Owned by the orchestration loop and mutated only between turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    conversation: Conversation,
    current_agent: AgentRole,
}

impl SessionState {
    /// A fresh session opened with `greeting` (skipped when empty)
    pub fn new(greeting: &str) -> Self {
        let mut conversation = Conversation::new();
        if !greeting.is_empty() {
            conversation.push(Message::assistant(greeting));
        }
        Self {
            conversation,
            current_agent: AgentRole::default(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn current_agent(&self) -> AgentRole {
        self.current_agent
    }

    /// Record a new user message at the start of a turn
    pub fn push_user_message(&mut self, content: impl Into<String>) {
        self.conversation.push(Message::user(content));
    }

    /// Apply the outcome of a turn: append its messages and hand control to
    /// the next agent. Returns the appended messages.
    pub fn apply(&mut self, outcome: ExecutionOutcome) -> &[Message] {
        let start = self.conversation.len();
        self.current_agent = outcome.next_agent;
        self.conversation.extend(outcome.messages);
        &self.conversation.messages()[start..]
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}
