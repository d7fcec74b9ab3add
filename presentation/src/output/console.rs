//! Console output formatter for troubleshooting turns

use colored::Colorize;
use troubleshoot_application::{RunTurnError, TurnOutput};
use troubleshoot_domain::util::preview;
use troubleshoot_domain::{AgentRole, Conversation, Message, Role};

/// Retrieved log payloads are shown as a preview of this many bytes
const LOG_PREVIEW_BYTES: usize = 400;

/// Formats conversation messages for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format everything a turn appended to the conversation
    pub fn format_turn(output: &TurnOutput) -> String {
        let mut text = String::new();

        for message in &output.messages {
            text.push_str(&Self::format_message(message));
            text.push('\n');
        }

        if output.messages.is_empty() {
            text.push_str(&format!(
                "{}\n",
                "(no reply this turn; add more detail or paste the logs)".dimmed()
            ));
        }

        if output.next_agent != output.handled_by {
            text.push_str(&format!(
                "{} {}\n",
                "Next:".dimmed(),
                output.next_agent.display_name().dimmed()
            ));
        }

        text
    }

    /// Format one message. User-role messages produced by agents carry
    /// retrieved logs and are shortened.
    pub fn format_message(message: &Message) -> String {
        match message.role {
            Role::Assistant => format!("{}\n{}\n", "Agent:".cyan().bold(), message.content),
            Role::User => format!(
                "{}\n{}\n",
                "Retrieved logs:".yellow().bold(),
                preview(&message.content, LOG_PREVIEW_BYTES).dimmed()
            ),
            Role::System => format!("{}\n{}\n", "System:".magenta().bold(), message.content),
        }
    }

    /// Format the whole conversation (for `/history`)
    pub fn format_history(conversation: &Conversation) -> String {
        if conversation.is_empty() {
            return format!("{}\n", "(conversation is empty)".dimmed());
        }

        conversation
            .iter()
            .enumerate()
            .map(|(i, message)| {
                format!(
                    "{} {}\n",
                    format!("[{}] {}:", i + 1, message.role.as_str()).bold(),
                    preview(&message.content, LOG_PREVIEW_BYTES)
                )
            })
            .collect()
    }

    pub fn format_error(error: &RunTurnError) -> String {
        let hint = match error {
            RunTurnError::EmptyMessage => "",
            RunTurnError::Agent(_) => " (your message was kept; try again or rephrase)",
        };
        format!("{} {}{}", "Error:".red().bold(), error, hint.dimmed())
    }

    pub fn format_agent(role: AgentRole) -> String {
        format!("{} {}", "Current agent:".cyan().bold(), role.display_name())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
