//! Conversation session domain.
//!
//! - [`entities::Message`]: a single role-tagged message
//! - [`entities::Conversation`]: the ordered, append-only message history
//! - [`state::SessionState`]: conversation plus the agent currently in control

pub mod entities;
pub mod state;
