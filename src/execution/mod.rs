//! Scenario execution engine

pub mod engine;
pub mod executor;

pub use engine::{Cucumber, RunSummary, TagPredicate};
pub use executor::{ExecutionResult, StepExecutor};
