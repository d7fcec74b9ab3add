//! Session configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};
use troubleshoot_domain::DEFAULT_GREETING;

/// Raw session configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// First assistant message of every session; empty disables it
    pub greeting: String,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}
