//! CLI command definitions

use crate::core::{RunConfig, SnippetDialectKind};
use clap::Args;
use std::path::PathBuf;

/// Run feature files
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Feature files to run (defaults to those in the config file)
    pub features: Vec<PathBuf>,

    /// Only run scenarios carrying one of these tags
    #[arg(long = "tags")]
    pub tags: Vec<String>,

    /// Never run scenarios carrying one of these tags
    #[arg(long = "exclude-tags")]
    pub exclude_tags: Vec<String>,

    /// Language for undefined step snippets
    #[arg(long, value_enum)]
    pub dialect: Option<DialectArg>,

    /// Path or name of the gherkin executable
    #[arg(long)]
    pub gherkin: Option<String>,
}

impl RunCommand {
    /// Layer command-line overrides on top of a loaded config
    pub fn apply(&self, mut config: RunConfig) -> RunConfig {
        if !self.features.is_empty() {
            config.features = self.features.clone();
        }
        config.tags.include.extend(self.tags.iter().cloned());
        config.tags.exclude.extend(self.exclude_tags.iter().cloned());
        if let Some(dialect) = self.dialect {
            config.snippet_dialect = dialect.into();
        }
        if let Some(gherkin) = &self.gherkin {
            config.gherkin = gherkin.clone();
        }
        config
    }
}

/// List the scenarios of a feature
#[derive(Debug, Args, Clone)]
pub struct ListCommand {
    /// Feature file to parse
    pub feature: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Path or name of the gherkin executable
    #[arg(long)]
    pub gherkin: Option<String>,
}

/// Snippet dialect argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DialectArg {
    Rust,
    Yaml,
}

impl From<DialectArg> for SnippetDialectKind {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Rust => SnippetDialectKind::Rust,
            DialectArg::Yaml => SnippetDialectKind::Yaml,
        }
    }
}
