//! Step implementations and the registry that resolves step text to them

pub mod args;
pub mod matcher;
pub mod registry;

use crate::core::{PickleArg, Slot, StateContainer, StateKey};
use crate::error::CucumberError;
use async_trait::async_trait;

pub use args::{ArgReader, StepArguments};
pub use matcher::{Matcher, StepMatch};
pub use registry::{Resolution, StepRegistry};

/// A registered step implementation.
///
/// The engine drives every implementation through the same sequence:
/// [`matcher`](Step::matcher) against the step text, [`slots`](Step::slots)
/// bound to the scenario's container, [`read_arguments`](Step::read_arguments)
/// on the step's argument, then [`invoke`](Step::invoke).
#[async_trait]
pub trait Step: Send + Sync {
    /// The full-text pattern this step answers to
    fn matcher(&self) -> &Matcher;

    /// Argument views this step reads
    fn readers(&self) -> &[ArgReader] {
        &[]
    }

    /// Container slots checked before the step runs.
    ///
    /// This only validates that required slots are set; it does not limit
    /// which values [`StepContext`] lets the step read or write.
    fn slots(&self) -> &[Slot] {
        &[]
    }

    fn read_arguments(&self, argument: Option<&PickleArg>) -> Result<StepArguments, CucumberError> {
        StepArguments::read(self.readers(), argument)
    }

    /// Run the step.
    ///
    /// Return [`CucumberError::Pending`] to mark the step as declared but
    /// not implemented yet; any other error fails the step.
    async fn invoke(&self, captures: StepMatch, ctx: &mut StepContext<'_>) -> anyhow::Result<()>;
}

/// What a step sees while it runs: the scenario's container and its arguments
pub struct StepContext<'a> {
    container: &'a mut StateContainer,
    arguments: StepArguments,
}

impl<'a> StepContext<'a> {
    pub fn new(container: &'a mut StateContainer, arguments: StepArguments) -> Self {
        Self {
            container,
            arguments,
        }
    }

    /// Read an optional scenario value
    pub fn scenario<K: StateKey>(&self) -> Option<&K::Value> {
        self.container.get::<K>()
    }

    /// Write a scenario value
    pub fn set_scenario<K: StateKey>(&mut self, value: K::Value) {
        self.container.set::<K>(value);
    }

    /// Read a required scenario value
    pub fn required<K: StateKey>(&self) -> Result<&K::Value, CucumberError> {
        self.container.get::<K>().ok_or_else(missing::<K>)
    }

    /// Update a required scenario value in place
    pub fn required_mut<K: StateKey>(&mut self) -> Result<&mut K::Value, CucumberError> {
        self.container.get_mut::<K>().ok_or_else(missing::<K>)
    }

    pub fn arguments(&self) -> &StepArguments {
        &self.arguments
    }
}

fn missing<K: StateKey>() -> CucumberError {
    CucumberError::RequiredStateMissing {
        slot: Slot::required::<K>().name(),
    }
}

type Handler = Box<dyn Fn(&StepMatch, &mut StepContext<'_>) -> anyhow::Result<()> + Send + Sync>;

/// A step backed by a synchronous closure
pub struct StepFn {
    matcher: Matcher,
    readers: Vec<ArgReader>,
    slots: Vec<Slot>,
    handler: Handler,
}

impl StepFn {
    pub fn new<F>(pattern: &str, handler: F) -> Result<Self, CucumberError>
    where
        F: Fn(&StepMatch, &mut StepContext<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Ok(Self {
            matcher: Matcher::new(pattern)?,
            readers: Vec::new(),
            slots: Vec::new(),
            handler: Box::new(handler),
        })
    }

    pub fn with_reader(mut self, reader: ArgReader) -> Self {
        self.readers.push(reader);
        self
    }

    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }
}

#[async_trait]
impl Step for StepFn {
    fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    fn readers(&self) -> &[ArgReader] {
        &self.readers
    }

    fn slots(&self) -> &[Slot] {
        &self.slots
    }

    async fn invoke(&self, captures: StepMatch, ctx: &mut StepContext<'_>) -> anyhow::Result<()> {
        (self.handler)(&captures, ctx)
    }
}
