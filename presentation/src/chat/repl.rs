//! REPL (Read-Eval-Print Loop) for interactive troubleshooting

use crate::config::ReplConfig;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::Path;
use tracing::warn;
use troubleshoot_application::{
    LlmGateway, LogSearchPort, NoTurnProgress, RunTurnUseCase, TurnProgressNotifier,
};
use troubleshoot_domain::{SessionState, Tokenizer};

/// Entries kept in the history file
const HISTORY_CAPACITY: usize = 1000;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    /// Show the agent that receives the next message
    Agent,
    /// Print the conversation so far
    History,
    /// Start a new session
    Reset,
    Quit,
    Unknown,
}

impl ReplCommand {
    /// Parse a line starting with `/`; other lines are not commands
    pub fn parse(line: &str) -> Option<Self> {
        let command = line.trim();
        if !command.starts_with('/') {
            return None;
        }
        Some(match command {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/agent" => ReplCommand::Agent,
            "/history" => ReplCommand::History,
            "/reset" | "/clear" => ReplCommand::Reset,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown,
        })
    }
}

/// Interactive troubleshooting REPL
pub struct ChatRepl<G, L, T>
where
    G: LlmGateway + 'static,
    L: LogSearchPort + 'static,
    T: Tokenizer + 'static,
{
    use_case: RunTurnUseCase<G, L, T>,
    session: SessionState,
    greeting: String,
    config: ReplConfig,
}

impl<G, L, T> ChatRepl<G, L, T>
where
    G: LlmGateway + 'static,
    L: LogSearchPort + 'static,
    T: Tokenizer + 'static,
{
    pub fn new(use_case: RunTurnUseCase<G, L, T>, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            use_case,
            session: SessionState::new(&greeting),
            greeting,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = Reedline::create();
        if let Some(path) = self.config.history_path() {
            match open_history(&path) {
                Ok(history) => line_editor = line_editor.with_history(history),
                Err(e) => warn!("History disabled ({}): {}", path.display(), e),
            }
        }
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("troubleshoot".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command, line) {
                            break;
                        }
                        continue;
                    }

                    self.process_message(line).await;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    println!("^C");
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Troubleshoot Agent - Chat Mode       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Commands: {}", "/help /agent /history /reset /quit".cyan());
        println!();
        if let Some(greeting) = self.session.conversation().last() {
            println!("{}", ConsoleFormatter::format_message(greeting));
        }
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand, line: &str) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?     - Show this help");
                println!("  /agent            - Show which agent handles the next message");
                println!("  /history          - Show the conversation so far");
                println!("  /reset, /clear    - Start a new session");
                println!("  /quit, /exit, /q  - Exit");
                println!();
            }
            ReplCommand::Agent => {
                println!("{}", ConsoleFormatter::format_agent(self.session.current_agent()));
            }
            ReplCommand::History => {
                print!(
                    "{}",
                    ConsoleFormatter::format_history(self.session.conversation())
                );
            }
            ReplCommand::Reset => {
                self.session = SessionState::new(&self.greeting);
                println!("{}", "Session reset.".green());
                if let Some(greeting) = self.session.conversation().last() {
                    println!("{}", ConsoleFormatter::format_message(greeting));
                }
            }
            ReplCommand::Unknown => {
                println!("Unknown command: {}", line);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_message(&mut self, message: &str) {
        println!();

        let progress: Box<dyn TurnProgressNotifier> = if self.config.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoTurnProgress)
        };

        match self
            .use_case
            .execute_with_progress(&mut self.session, message, progress.as_ref())
            .await
        {
            Ok(output) => println!("{}", ConsoleFormatter::format_turn(&output)),
            Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e)),
        }
    }
}

fn open_history(path: &Path) -> Result<Box<FileBackedHistory>, String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    FileBackedHistory::with_file(HISTORY_CAPACITY, path.to_path_buf())
        .map(Box::new)
        .map_err(|e| e.to_string())
}
