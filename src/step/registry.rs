//! Ordered collection of step implementations

use crate::step::{Step, StepMatch};
use std::sync::Arc;

/// Result of resolving one step's text against the registry
pub enum Resolution<'a> {
    /// No implementation matched
    Undefined,
    /// Exactly one implementation matched
    Matched {
        step: &'a dyn Step,
        captures: StepMatch,
    },
    /// Several implementations matched; carries their pattern sources
    Ambiguous(Vec<String>),
}

/// Step implementations, in registration order.
///
/// Read-only while a run is in progress, so it is shared by every scenario.
#[derive(Default, Clone)]
pub struct StepRegistry {
    steps: Vec<Arc<dyn Step>>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step implementation
    pub fn register<S: Step + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Arc::new(step));
        self
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_step<S: Step + 'static>(mut self, step: S) -> Self {
        self.register(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Pattern sources, in registration order
    pub fn patterns(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.matcher().source()).collect()
    }

    /// Evaluate every implementation against `text`.
    ///
    /// Registration order carries no priority: two or more matches are
    /// always ambiguous.
    pub fn resolve(&self, text: &str) -> Resolution<'_> {
        let mut matches: Vec<(&dyn Step, StepMatch)> = self
            .steps
            .iter()
            .filter_map(|step| {
                step.matcher()
                    .matches(text)
                    .map(|captures| (step.as_ref(), captures))
            })
            .collect();

        match matches.len() {
            0 => Resolution::Undefined,
            1 => {
                let (step, captures) = matches.remove(0);
                Resolution::Matched { step, captures }
            }
            _ => Resolution::Ambiguous(
                matches
                    .iter()
                    .map(|(step, _)| step.matcher().source().to_string())
                    .collect(),
            ),
        }
    }
}

impl std::fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepRegistry")
            .field("patterns", &self.patterns())
            .finish()
    }
}
