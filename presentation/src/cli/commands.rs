//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for troubleshoot-agent
#[derive(Parser, Debug)]
#[command(name = "troubleshoot-agent")]
#[command(author, version, about = "Multi-agent incident troubleshooting assistant")]
#[command(long_about = r#"
troubleshoot-agent walks an operator from a problem report to a root-cause
analysis. Four agents hand the conversation to each other:

1. Triage: extracts the service name and transaction id
2. Log Checker: judges whether pasted logs are usable
3. Log Retriever: fetches logs from the log store when none are available
4. Analysis: produces a scored root-cause analysis

Configuration files are loaded from (in priority order):
1. TROUBLESHOOT_* environment variables (e.g. TROUBLESHOOT_LLM__MODEL)
2. --config <path>       Explicit config file
3. ./troubleshoot.toml   Project-level config
4. ~/.config/troubleshoot-agent/config.toml   Global config

Example:
  troubleshoot-agent
  troubleshoot-agent "rbt-service fails, transaction id DGPS241129073313898785093"
  troubleshoot-agent --model qwen2.5:32b --base-url http://gpu-box:8000/v1/
"#)]
pub struct Cli {
    /// Run a single turn with this message and exit (starts the REPL when omitted)
    pub message: Option<String>,

    /// Model for every agent (overrides [llm].model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// OpenAI-compatible base URL (overrides [llm].base_url)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
