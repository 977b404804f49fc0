//! Whole-text step pattern matching

use crate::error::CucumberError;
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;

/// A compiled step pattern.
///
/// The pattern is anchored at both ends when compiled, so it only matches
/// when it consumes the entire step text.
#[derive(Debug, Clone)]
pub struct Matcher {
    source: String,
    regex: Regex,
}

impl Matcher {
    pub fn new(pattern: &str) -> Result<Self, CucumberError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            CucumberError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written at registration
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match the full step text and collect its capture groups
    pub fn matches(&self, text: &str) -> Option<StepMatch> {
        let captures = self.regex.captures(text)?;

        let groups = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str().to_string()))
            .collect();

        let named = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();

        Some(StepMatch {
            text: text.to_string(),
            groups,
            named,
        })
    }
}

/// Captured values of a successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMatch {
    text: String,
    groups: Vec<Option<String>>,
    named: HashMap<String, String>,
}

impl StepMatch {
    /// The full step text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of capture groups in the pattern
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Capture group `index` (0 is the first group, not the whole text)
    pub fn get(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }

    pub fn name(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    /// Parse capture group `index` into a typed value
    pub fn parse<T: FromStr>(&self, index: usize) -> Result<T, CucumberError> {
        let value = self.get(index).unwrap_or_default();
        value.parse().map_err(|_| CucumberError::CaptureConversion {
            index,
            value: value.to_string(),
            target: std::any::type_name::<T>(),
        })
    }
}
