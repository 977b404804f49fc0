//! Human-readable terminal reporter

use crate::core::{ScenarioState, Status};
use crate::report::{Reporter, RustSnippets, SnippetDialect};
use console::{style, Emoji};
use std::time::Duration;

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static PENDING: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static UNDEFINED: Emoji<'_, '_> = Emoji("❔ ", "? ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

const DIVIDER: &str = "------------------------------------------------------------------------";

/// Prints scenario results, snippets and a feature summary to stdout
pub struct ConsoleReporter {
    dialect: Box<dyn SnippetDialect>,
}

impl ConsoleReporter {
    pub fn new(dialect: Box<dyn SnippetDialect>) -> Self {
        Self { dialect }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(Box::new(RustSnippets))
    }
}

impl Reporter for ConsoleReporter {
    fn on_feature_begin(&self, feature: &str) {
        println!("\n{} Running feature {}\n{}\n", ROCKET, style(feature).bold(), DIVIDER);
    }

    fn on_scenario_finished(&self, state: &ScenarioState, step_elapsed: Duration, total: Duration) {
        println!("{}", format_scenario(state, step_elapsed, total));
    }

    fn on_steps_undefined(&self, steps: &[String]) {
        println!("{}\n\n  {}\n", DIVIDER, style("Undefined steps:").yellow().bold());
        println!("{}", self.dialect.generate(steps));
    }

    fn on_feature_end(&self, feature: &str, had_errors: bool, step_elapsed: Duration, total: Duration) {
        println!("{}", format_feature_end(feature, had_errors, step_elapsed, total));
    }
}

/// Format a duration for display
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Format a status label for display
pub fn format_status(status: Status) -> String {
    match status {
        Status::Success => style("PASSED").green().to_string(),
        Status::Undefined => style("UNDEFINED").yellow().to_string(),
        Status::Pending => style("PENDING").cyan().to_string(),
        Status::Failure => style("FAILED").red().to_string(),
    }
}

/// Format a finished scenario, with per-step details when it failed
pub fn format_scenario(state: &ScenarioState, step_elapsed: Duration, total: Duration) -> String {
    let name = style(&state.name).bold();
    let timing = format!(
        "after {} ({} with hooks)",
        format_duration(step_elapsed),
        format_duration(total)
    );

    match state.status() {
        Status::Success => format!("  {} Scenario {} passed {}", CHECK, name, style(timing).dim()),
        Status::Undefined => format!("  {} Scenario {} has undefined steps", UNDEFINED, name),
        Status::Pending => format!("  {} Scenario {} is pending implementation", PENDING, name),
        Status::Failure => {
            let mut report = format!(
                "  {} Scenario {} failed {}\n    Details:\n",
                CROSS,
                name,
                style(timing).dim()
            );
            for step in state.steps() {
                report.push_str(&format!("     - {}: {}\n", step.text(), format_status(step.status())));
                if let Some(error) = step.error() {
                    report.push_str(&format!("        Error: {}\n", style(error).red()));
                    for cause in error.chain().skip(1) {
                        report.push_str(&format!("        Reason: {}\n", cause));
                    }
                }
            }
            report
        }
    }
}

/// Format the end-of-feature summary
pub fn format_feature_end(feature: &str, had_errors: bool, step_elapsed: Duration, total: Duration) -> String {
    let outcome = if had_errors {
        format!("{} completed {}", CROSS, style("with errors").red())
    } else {
        format!("{} completed {}", CHECK, style("successfully").green())
    };

    format!(
        "\n{}\n\nFeature {} {}\n  Total duration: {}\n  Time with hooks: {}\n",
        DIVIDER,
        style(feature).bold(),
        outcome,
        format_duration(step_elapsed),
        format_duration(total)
    )
}
