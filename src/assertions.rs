//! Outcome-producing checks for step bodies
//!
//! Each helper returns an error instead of panicking, so a failed check
//! becomes a `failure` outcome for the step.

use crate::error::CucumberError;
use std::fmt::Debug;
use thiserror::Error;

/// A check inside a step did not hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    pub message: String,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Fail with `message` unless `pass` holds
pub fn check(pass: bool, message: impl Into<String>) -> Result<(), AssertionFailure> {
    if pass {
        Ok(())
    } else {
        Err(AssertionFailure::new(message))
    }
}

/// Fail unless both values are equal
pub fn check_eq<T: PartialEq + Debug>(actual: T, expected: T) -> Result<(), AssertionFailure> {
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionFailure::new(format!(
            "{:?} is not equal to {:?}",
            actual, expected
        )))
    }
}

/// Fail unconditionally
pub fn fail<T>(message: impl Into<String>) -> Result<T, AssertionFailure> {
    Err(AssertionFailure::new(message))
}

/// Mark the current step as declared but not implemented yet
pub fn pending() -> anyhow::Result<()> {
    Err(CucumberError::Pending.into())
}
