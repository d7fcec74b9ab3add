//! Progress reporting for troubleshooting turns

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use troubleshoot_application::{LogQuery, TurnProgressNotifier};
use troubleshoot_domain::AgentRole;

/// Spinner showing which agent is working
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn set_message(&self, message: String) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(spinner) = guard.as_ref()
        {
            spinner.set_message(message);
        }
    }

    fn finish(&self, message: String) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(spinner) = guard.take()
        {
            spinner.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for ProgressReporter {
    fn on_agent_start(&self, role: AgentRole) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        let spinner = guard.get_or_insert_with(|| {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(Self::spinner_style());
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        });
        spinner.set_prefix(role.display_name());
        spinner.set_message("thinking...");
    }

    fn on_handoff(&self, _from: AgentRole, to: AgentRole) {
        self.set_message(format!("handing off to {}", to.display_name()));
    }

    fn on_log_search(&self, query: &LogQuery) {
        self.set_message(format!(
            "searching logs for {} in {}",
            query.search_term, query.index
        ));
    }

    fn on_turn_complete(&self, next: AgentRole) {
        self.finish(format!("{} next: {}", "done".green(), next.display_name()));
    }

    fn on_turn_failed(&self, role: AgentRole) {
        self.finish(format!("{} in {}", "failed".red(), role.display_name()));
    }
}

/// Simple text-based progress (no spinner), for non-interactive output
pub struct SimpleProgress;

impl TurnProgressNotifier for SimpleProgress {
    fn on_agent_start(&self, role: AgentRole) {
        eprintln!("{} {}", "->".cyan(), role.display_name().bold());
    }

    fn on_handoff(&self, from: AgentRole, to: AgentRole) {
        eprintln!(
            "   {} {} {}",
            from.display_name().dimmed(),
            "=>".cyan(),
            to.display_name()
        );
    }

    fn on_log_search(&self, query: &LogQuery) {
        eprintln!("   searching logs: {} ({})", query.search_term, query.index);
    }

    fn on_turn_complete(&self, _next: AgentRole) {}

    fn on_turn_failed(&self, role: AgentRole) {
        eprintln!("   {} {}", "x".red(), role.display_name());
    }
}
