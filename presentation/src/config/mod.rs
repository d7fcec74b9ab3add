//! Presentation-level configuration
//!
//! REPL behavior, resolved from the `[repl]` section by the binary.

use std::path::PathBuf;

/// Directory under the user data dir holding the default history file
const APP_DIR: &str = "troubleshoot-agent";

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Show a spinner while agents work
    pub show_progress: bool,
    /// History file; `None` uses the default location
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// The history file to use, if any location is available
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR).join("history.txt")))
    }
}
