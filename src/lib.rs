//! cuke - a Gherkin scenario execution engine
//!
//! Feature files are parsed by the external `gherkin` executable into
//! pickles, whose steps are matched against a [`StepRegistry`] and run with
//! [`Hooks`] around them. Progress goes to a [`Reporter`].

pub mod assertions;
pub mod cli;
pub mod core;
pub mod error;
pub mod execution;
pub mod gherkin;
pub mod hooks;
pub mod report;
pub mod step;

// Re-export commonly used types
pub use assertions::{check, check_eq, fail, pending, AssertionFailure};
pub use crate::core::{
    DataTable, Envelope, Pickle, PickleArg, PickleStep, RunConfig, ScenarioState, Slot, SlotMode,
    StateContainer, StateKey, Status, StepOutcome, TagFilter,
};
pub use error::CucumberError;
pub use execution::{Cucumber, RunSummary};
pub use gherkin::{GherkinSubprocess, PickleSource};
pub use hooks::{Hook, Hooks};
pub use report::{ConsoleReporter, NoReporter, Reporter};
pub use step::{ArgReader, Step, StepArguments, StepContext, StepFn, StepMatch, StepRegistry};
