//! CLI output formatting

use crate::{core::ExecutionStatus, execution::ExecutionEvent};
use chrono::Duration;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Pending => style("PENDING").dim().to_string(),
        ExecutionStatus::Running => style("RUNNING").yellow().to_string(),
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name,
            total_steps,
        } => format!(
            "{} Starting {} ({} steps, {})",
            ROCKET,
            style(pipeline_name).bold(),
            total_steps,
            style(&execution_id.to_string()[..8]).dim()
        ),
        ExecutionEvent::StepStarted { index, step } => {
            format!("{} [{}] {}", SPINNER, index + 1, style(step).cyan())
        }
        ExecutionEvent::StepCompleted { index, step } => {
            format!("{} [{}] {}", CHECK, index + 1, style(step).green())
        }
        ExecutionEvent::StepFailed {
            index,
            step,
            error,
            ..
        } => format!(
            "{} [{}] {}: {}",
            CROSS,
            index + 1,
            style(step).red(),
            style(error).dim()
        ),
        ExecutionEvent::PipelineCompleted {
            execution_id,
            status,
            completed_steps,
            total_steps,
            elapsed,
        } => format!(
            "{} Pipeline ({}) {} - {}/{} steps{}",
            INFO,
            style(&execution_id.to_string()[..8]).dim(),
            format_status(*status),
            completed_steps,
            total_steps,
            elapsed
                .map(|elapsed| format!(" in {}", format_elapsed(elapsed)))
                .unwrap_or_default()
        ),
    }
}

/// `1.5s`, or `2m 03s` past a minute
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    if millis < 60_000 {
        format!("{:.1}s", millis as f64 / 1000.0)
    } else {
        format!("{}m {:02}s", millis / 60_000, (millis % 60_000) / 1000)
    }
}

/// Format the composed steps for `--dry-run`
pub fn format_plan(steps: &[(String, String)]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, (name, description))| {
            format!(
                "  {}. {}\n     {}\n",
                i + 1,
                style(name).bold(),
                style(description).dim()
            )
        })
        .collect()
}
