//! Reporting sink for run progress
//!
//! The engine notifies a [`Reporter`] strictly sequentially: it never calls
//! two methods at once and never moves on before a call returns.
//!
//! # Example
//!
//! ```
//! use cuke::{Reporter, ScenarioState};
//! use std::time::Duration;
//!
//! struct Dots;
//!
//! impl Reporter for Dots {
//!     fn on_scenario_finished(&self, state: &ScenarioState, _: Duration, _: Duration) {
//!         print!("{}", if state.is_success() { "." } else { "F" });
//!     }
//! }
//! ```

pub mod console;
pub mod snippet;

use crate::core::ScenarioState;
use std::time::Duration;

pub use self::console::ConsoleReporter;
pub use snippet::{RustSnippets, SnippetDialect, YamlSnippets};

/// Receives structured status notifications from the engine.
///
/// Every method does nothing by default.
pub trait Reporter: Send + Sync {
    fn on_feature_begin(&self, _feature: &str) {}

    /// Called after every step with the scenario's partial state
    fn on_scenario_running(&self, _state: &ScenarioState) {}

    /// Called once per scenario after its steps and hook teardown
    fn on_scenario_finished(
        &self,
        _state: &ScenarioState,
        _step_elapsed: Duration,
        _total_with_hooks: Duration,
    ) {
    }

    /// Called once per run with the deduplicated undefined step texts
    fn on_steps_undefined(&self, _steps: &[String]) {}

    fn on_feature_end(
        &self,
        _feature: &str,
        _had_errors: bool,
        _step_elapsed: Duration,
        _total_with_hooks: Duration,
    ) {
    }
}

/// A reporter that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReporter;

impl Reporter for NoReporter {}
