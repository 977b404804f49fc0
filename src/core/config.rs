//! Run configuration from YAML

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Top-level run configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Path or name of the gherkin executable
    #[serde(default = "default_gherkin")]
    pub gherkin: String,

    /// Feature files to run
    #[serde(default)]
    pub features: Vec<PathBuf>,

    /// Tag filter applied to every pickle
    #[serde(default)]
    pub tags: TagFilter,

    /// Dialect used for undefined step snippets
    #[serde(default)]
    pub snippet_dialect: SnippetDialectKind,

    /// Timeout for the gherkin subprocess (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Include/exclude tag lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    /// Run only pickles carrying at least one of these (all when empty)
    #[serde(default)]
    pub include: Vec<String>,

    /// Never run pickles carrying any of these
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Snippet flavour for undefined steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetDialectKind {
    #[default]
    Rust,
    Yaml,
}

fn default_gherkin() -> String {
    "gherkin".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gherkin: default_gherkin(),
            features: Vec::new(),
            tags: TagFilter::default(),
            snippet_dialect: SnippetDialectKind::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RunConfig {
    /// Load run configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse run configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RunConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the run configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        self.tags.validate()
    }
}

impl TagFilter {
    pub fn validate(&self) -> Result<()> {
        for tag in self.include.iter().chain(&self.exclude) {
            if !tag.starts_with('@') {
                anyhow::bail!("Tag '{}' must start with '@'", tag);
            }
        }

        let included: HashSet<_> = self.include.iter().collect();
        if let Some(tag) = self.exclude.iter().find(|t| included.contains(t)) {
            anyhow::bail!("Tag '{}' is both included and excluded", tag);
        }

        Ok(())
    }

    /// Whether a pickle with these tags should run
    pub fn accepts(&self, tags: &[String]) -> bool {
        let has = |wanted: &String| tags.iter().any(|t| t == wanted);

        if self.exclude.iter().any(has) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(has)
    }

    /// Turn the filter into the engine's tag predicate
    pub fn into_predicate(self) -> impl Fn(&[String]) -> bool + Send + Sync + 'static {
        move |tags| self.accepts(tags)
    }
}
