//! Core domain models
//!
//! This module defines the pickles handed over by the parser, the outcome
//! state accumulated while running them, the scenario-scoped state
//! container and the run configuration.

pub mod config;
pub mod container;
pub mod pickle;
pub mod state;

pub use config::{RunConfig, SnippetDialectKind, TagFilter};
pub use container::{Slot, SlotMode, StateContainer, StateKey};
pub use pickle::*;
pub use state::*;
