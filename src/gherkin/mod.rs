//! Gherkin parser boundary
//!
//! Feature files are parsed by an external `gherkin` executable that prints
//! one cucumber message per line. This module decodes that stream into
//! [`Envelope`]s.

pub mod subprocess;

use crate::core::Envelope;
use crate::error::CucumberError;
use async_trait::async_trait;
use std::path::Path;

pub use subprocess::GherkinSubprocess;

/// Anything that can turn a feature file into parse events
#[async_trait]
pub trait PickleSource: Send + Sync {
    /// Parse events for `feature`, in the order the parser produced them
    async fn envelopes(&self, feature: &Path) -> Result<Vec<Envelope>, CucumberError>;
}

/// Decode NDJSON parser output, skipping blank lines
pub fn parse_ndjson(output: &str) -> Result<Vec<Envelope>, CucumberError> {
    output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| CucumberError::Envelope {
                line: idx + 1,
                source,
            })
        })
        .collect()
}
