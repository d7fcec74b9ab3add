//! CLI entrypoint for troubleshoot-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use troubleshoot_application::{
    ExecuteAgentUseCase, NoTurnProgress, RunTurnUseCase, TurnProgressNotifier,
};
use troubleshoot_domain::{DEFAULT_CREDENTIAL, SessionState};
use troubleshoot_infrastructure::{
    ConfigLoader, FileConfig, HttpLogSearch, OpenAiCompatibleGateway, TiktokenTokenizer,
};
use troubleshoot_presentation::{ChatRepl, Cli, ConsoleFormatter, ReplConfig, SimpleProgress};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_ref())?;

    info!("Starting troubleshoot-agent");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.llm.base_url = base_url.clone();
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("Effective configuration:");
        println!("{}", toml::to_string_pretty(&redacted(&config))?);
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;
    let roster = config.agent_roster().context("Invalid configuration")?;

    info!(
        base_url = %config.llm.base_url,
        model = %config.llm.model,
        log_search = %config.log_search.endpoint,
        "Configuration loaded"
    );

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiCompatibleGateway::new(
        config.llm_timeout(),
        config.llm.accept_invalid_certs,
    )?);
    let log_search = Arc::new(
        HttpLogSearch::new(
            config.log_search.endpoint.clone(),
            config.log_search.cookie.clone(),
            config.log_search_timeout(),
        )
        .context("Failed to create log search client")?,
    );
    let tokenizer = Arc::new(TiktokenTokenizer::o200k_base()?);

    let agents = ExecuteAgentUseCase::new(gateway, log_search, tokenizer, roster)
        .with_retrieval(config.retrieval_params());
    let use_case = RunTurnUseCase::new(agents);

    // Single message mode
    if let Some(message) = cli.message {
        let mut session = SessionState::new(&config.session.greeting);
        let progress: Box<dyn TurnProgressNotifier> = if cli.quiet {
            Box::new(NoTurnProgress)
        } else {
            Box::new(SimpleProgress)
        };

        return match use_case
            .execute_with_progress(&mut session, &message, progress.as_ref())
            .await
        {
            Ok(output) => {
                println!("{}", ConsoleFormatter::format_turn(&output));
                Ok(())
            }
            Err(e) => Err(e.into()),
        };
    }

    // Chat mode
    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_file.as_ref().map(PathBuf::from),
    };
    let mut repl = ChatRepl::new(use_case, config.session.greeting.clone()).with_config(repl_config);
    repl.run().await?;

    Ok(())
}

/// Initialize logging based on verbosity level. `RUST_LOG` wins when set.
///
/// With `--log-file` the log goes to that file instead of stderr, so it does
/// not interleave with the chat.
fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// Copy of `config` safe to print
fn redacted(config: &FileConfig) -> FileConfig {
    let mut config = config.clone();
    if config.llm.api_key != DEFAULT_CREDENTIAL {
        config.llm.api_key = "<redacted>".to_string();
    }
    if config.log_search.cookie.is_some() {
        config.log_search.cookie = Some("<redacted>".to_string());
    }
    config
}
