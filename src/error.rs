//! Error types for scenario execution

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of structured argument a step can carry or expect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    DocString,
    DataTable,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKind::DocString => write!(f, "doc string"),
            ArgKind::DataTable => write!(f, "data table"),
        }
    }
}

/// Which half of a hook failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Before,
    After,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::Before => write!(f, "before"),
            HookPhase::After => write!(f, "after"),
        }
    }
}

/// Error types for matching, binding and running scenarios
#[derive(Debug, Error)]
pub enum CucumberError {
    #[error("Step '{step}' matches more than one pattern: {}", .patterns.join(", "))]
    AmbiguousMatch {
        step: String,
        patterns: Vec<String>,
    },

    #[error("Implementation pending")]
    Pending,

    #[error("Expected a {expected} argument, found a {found}")]
    ArgumentTypeMismatch { expected: ArgKind, found: ArgKind },

    #[error("No {0} argument was read for this step")]
    MissingArgument(ArgKind),

    #[error("Could not decode data table: {0}")]
    TableDecode(#[source] serde_json::Error),

    #[error("Required scenario value '{slot}' was never set")]
    RequiredStateMissing { slot: &'static str },

    #[error("Parse error: {0}")]
    ParseFailure(String),

    #[error("Could not locate gherkin executable '{}'", .0.display())]
    PathResolutionFailure(PathBuf),

    #[error("Invalid step pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Capture {index} ('{value}') is not a valid {target}")]
    CaptureConversion {
        index: usize,
        value: String,
        target: &'static str,
    },

    #[error("Malformed envelope on line {line}: {source}")]
    Envelope {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("gherkin exited with code {code}: {stderr}")]
    ParserProcess { code: i32, stderr: String },

    #[error("gherkin timed out after {0} seconds")]
    ParserTimeout(u64),

    #[error("{phase} hook failed: {source}")]
    Hook {
        phase: HookPhase,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CucumberError {
    /// Whether a handler error is the pending sentinel
    pub fn is_pending(error: &anyhow::Error) -> bool {
        matches!(error.downcast_ref::<CucumberError>(), Some(CucumberError::Pending))
    }
}
