//! Step executor - resolves and runs individual steps

use crate::{
    core::{PickleStep, ScenarioState, StateContainer, StepOutcome},
    error::CucumberError,
    step::{Resolution, StepContext, StepRegistry},
};
use tracing::debug;

/// Result of executing a step
#[derive(Debug, Clone)]
pub enum ExecutionResult {
    /// An outcome to append to the scenario
    Outcome(StepOutcome),
    /// Matched, but not invoked because the scenario already stopped passing
    Skipped,
}

/// Executes single steps against a registry
#[derive(Debug, Clone, Default)]
pub struct StepExecutor {
    registry: StepRegistry,
}

impl StepExecutor {
    pub fn new(registry: StepRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Execute one step of a scenario.
    ///
    /// Every step is matched, so undefined steps surface even after a
    /// failure, but a matched step is only invoked while `state` is still
    /// passing. Step errors become outcomes; the only error returned is a
    /// required container slot that was never set.
    pub async fn execute(
        &self,
        step: &PickleStep,
        container: &mut StateContainer,
        state: &ScenarioState,
    ) -> Result<ExecutionResult, CucumberError> {
        let text = step.text.as_str();

        let (implementation, captures) = match self.registry.resolve(text) {
            Resolution::Undefined => {
                debug!("Step '{}' is undefined", text);
                return Ok(ExecutionResult::Outcome(StepOutcome::Undefined {
                    text: text.to_string(),
                }));
            }
            Resolution::Ambiguous(patterns) => {
                debug!("Step '{}' is ambiguous ({} matches)", text, patterns.len());
                let error = CucumberError::AmbiguousMatch {
                    step: text.to_string(),
                    patterns,
                };
                return Ok(ExecutionResult::Outcome(StepOutcome::failure(text, error.into())));
            }
            Resolution::Matched { step, captures } => (step, captures),
        };

        if !state.is_success() {
            debug!("Skipping step '{}' after {} scenario state", text, state.status());
            return Ok(ExecutionResult::Skipped);
        }

        container.bind(implementation.slots())?;

        let arguments = match implementation.read_arguments(step.argument.as_ref()) {
            Ok(arguments) => arguments,
            Err(e) => return Ok(ExecutionResult::Outcome(StepOutcome::failure(text, e.into()))),
        };

        debug!("Invoking '{}' for step '{}'", implementation.matcher().source(), text);
        let mut ctx = StepContext::new(container, arguments);
        let outcome = match implementation.invoke(captures, &mut ctx).await {
            Ok(()) => StepOutcome::Success {
                text: text.to_string(),
            },
            Err(e) if CucumberError::is_pending(&e) => StepOutcome::Pending {
                text: text.to_string(),
            },
            Err(e) => StepOutcome::failure(text, e),
        };

        Ok(ExecutionResult::Outcome(outcome))
    }
}
