//! Interactive chat module
//!
//! Provides a line-editor based interactive chat with the agents.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
