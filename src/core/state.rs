//! Scenario outcome models

use std::fmt;
use std::sync::Arc;

/// Outcome kind of a step, and aggregate status of a scenario.
///
/// Variants are ordered by priority: when steps disagree, the greatest wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Success,
    Undefined,
    Pending,
    Failure,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Undefined => "undefined",
            Status::Pending => "pending",
            Status::Failure => "failure",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded result of one step
#[derive(Debug, Clone)]
pub enum StepOutcome {
    Success { text: String },
    Undefined { text: String },
    Pending { text: String },
    Failure { text: String, error: Arc<anyhow::Error> },
}

impl StepOutcome {
    pub fn failure(text: impl Into<String>, error: anyhow::Error) -> Self {
        StepOutcome::Failure {
            text: text.into(),
            error: Arc::new(error),
        }
    }

    /// The literal step text
    pub fn text(&self) -> &str {
        match self {
            StepOutcome::Success { text }
            | StepOutcome::Undefined { text }
            | StepOutcome::Pending { text }
            | StepOutcome::Failure { text, .. } => text,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            StepOutcome::Success { .. } => Status::Success,
            StepOutcome::Undefined { .. } => Status::Undefined,
            StepOutcome::Pending { .. } => Status::Pending,
            StepOutcome::Failure { .. } => Status::Failure,
        }
    }

    pub fn error(&self) -> Option<&anyhow::Error> {
        match self {
            StepOutcome::Failure { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// Accumulated state of one pickle run
#[derive(Debug, Clone)]
pub struct ScenarioState {
    /// Pickle ID
    pub id: String,

    /// Pickle display name
    pub name: String,

    steps: Vec<StepOutcome>,
}

impl ScenarioState {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step outcome; outcomes are never reordered or removed
    pub fn record(&mut self, outcome: StepOutcome) {
        self.steps.push(outcome);
    }

    pub fn steps(&self) -> &[StepOutcome] {
        &self.steps
    }

    /// Highest-priority status among recorded steps (success when empty)
    pub fn status(&self) -> Status {
        self.steps
            .iter()
            .map(StepOutcome::status)
            .max()
            .unwrap_or(Status::Success)
    }

    pub fn is_success(&self) -> bool {
        self.status() == Status::Success
    }

    /// Texts of the steps that had no implementation
    pub fn undefined_steps(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(|s| s.status() == Status::Undefined)
            .map(StepOutcome::text)
    }
}
