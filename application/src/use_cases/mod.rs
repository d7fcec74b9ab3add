//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod execute_agent;
pub mod run_turn;
