//! Scenario-scoped state shared between steps

use crate::error::CucumberError;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Typed identity of a value stored in a [`StateContainer`].
///
/// Implemented by zero-sized marker types:
///
/// ```
/// use cuke::StateKey;
///
/// struct Basket;
///
/// impl StateKey for Basket {
///     type Value = Vec<String>;
/// }
/// ```
pub trait StateKey: 'static {
    type Value: Send + Sync + 'static;
}

/// How a step binds to a container slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMode {
    /// May be unset; reads return `Option`
    Optional,
    /// Must be set before the step runs
    Required,
}

/// A container slot a step declares it uses
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    name: &'static str,
    key: TypeId,
    mode: SlotMode,
}

impl Slot {
    pub fn optional<K: StateKey>() -> Self {
        Self::new::<K>(SlotMode::Optional)
    }

    pub fn required<K: StateKey>() -> Self {
        Self::new::<K>(SlotMode::Required)
    }

    fn new<K: StateKey>(mode: SlotMode) -> Self {
        Self {
            name: key_name::<K>(),
            key: TypeId::of::<K>(),
            mode,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn mode(&self) -> SlotMode {
        self.mode
    }
}

/// Per-scenario key/value store.
///
/// A fresh container is built for every pickle and dropped once the
/// scenario has been reported, so nothing leaks between scenarios.
#[derive(Default)]
pub struct StateContainer {
    values: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl StateContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<K: StateKey>(&self) -> Option<&K::Value> {
        self.values
            .get(&TypeId::of::<K>())
            .and_then(|v| v.downcast_ref::<K::Value>())
    }

    pub fn get_mut<K: StateKey>(&mut self) -> Option<&mut K::Value> {
        self.values
            .get_mut(&TypeId::of::<K>())
            .and_then(|v| v.downcast_mut::<K::Value>())
    }

    /// Store a value, replacing any previous one.
    ///
    /// There is no way to unset a slot: values only ever get replaced.
    pub fn set<K: StateKey>(&mut self, value: K::Value) {
        self.values.insert(TypeId::of::<K>(), Box::new(value));
    }

    pub fn contains<K: StateKey>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<K>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check a step's declared slots against the current contents
    pub fn bind(&self, slots: &[Slot]) -> Result<(), CucumberError> {
        for slot in slots {
            if slot.mode == SlotMode::Required && !self.values.contains_key(&slot.key) {
                return Err(CucumberError::RequiredStateMissing { slot: slot.name });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for StateContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateContainer")
            .field("slots", &self.values.len())
            .finish()
    }
}

fn key_name<K: StateKey>() -> &'static str {
    let full = std::any::type_name::<K>();
    full.rsplit("::").next().unwrap_or(full)
}
