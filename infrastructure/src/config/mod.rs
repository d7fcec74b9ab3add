//! Configuration file loading for troubleshoot-agent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TROUBLESHOOT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./troubleshoot.toml` or `./.troubleshoot.toml`
//! 4. Global: `$XDG_CONFIG_HOME/troubleshoot-agent/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentOverride, FileAgentsConfig, FileConfig, FileLlmConfig,
    FileLogSearchConfig, FileReplConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
