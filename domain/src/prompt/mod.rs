//! Prompt and reply text for the troubleshooting agents

mod instructions;
mod replies;

pub use instructions::AgentInstructions;
pub use replies::AgentReplies;
