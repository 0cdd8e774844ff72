//! CLI output formatting

use crate::execution::ExecutionEvent;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a stderr spinner for `--progress`
pub fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(template);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Format an execution event for the progress spinner
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted { run_id, name, .. } => format!(
            "{}Starting {} ({})",
            ROCKET,
            style(name).bold(),
            style(&run_id.to_string()[..8]).dim()
        ),
        ExecutionEvent::JobStarted { job, steps } => format!(
            "{}{} ({} steps)",
            INFO,
            style(job).cyan(),
            steps
        ),
        ExecutionEvent::StepStarted { job, step } => {
            format!("{} / {}", style(job).dim(), style(step).cyan())
        }
        ExecutionEvent::StepFinished { job, step, elapsed } => format!(
            "{}{} / {} {}",
            CHECK,
            style(job).dim(),
            style(step).green(),
            style(format_duration(*elapsed)).dim()
        ),
        ExecutionEvent::JobFinished { job } => format!("{}{}", CHECK, style(job).green()),
        ExecutionEvent::PipelineFinished { run_id, .. } => format!(
            "{}Pipeline ({}) {}",
            INFO,
            style(&run_id.to_string()[..8]).dim(),
            style("finished").green()
        ),
    }
}

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}
