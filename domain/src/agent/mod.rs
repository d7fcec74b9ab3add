//! Agent domain.
//!
//! - [`role::AgentRole`]: the closed set of agents and their handoff graph
//! - [`config::AgentConfig`]: immutable per-role model configuration
//! - [`outcome::ExecutionOutcome`]: what one agent execution hands back

pub mod config;
pub mod outcome;
pub mod role;
