//! Skeletons for undefined steps

use crate::core::SnippetDialectKind;
use serde::Serialize;
use tracing::warn;

/// Renders undefined step texts as code to paste into a step library
pub trait SnippetDialect: Send + Sync {
    fn generate(&self, steps: &[String]) -> String;
}

/// `StepFn` registrations that report themselves as pending
#[derive(Debug, Clone, Copy, Default)]
pub struct RustSnippets;

/// Step list in the YAML step-definition format
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSnippets;

fn anchored(step: &str) -> String {
    format!("^{}$", regex::escape(step))
}

impl SnippetDialect for RustSnippets {
    fn generate(&self, steps: &[String]) -> String {
        let mut snippet = String::new();

        for step in steps {
            snippet.push_str(&format!(
                "\nregistry.register(StepFn::new(r#\"{}\"#, |_captures, _ctx| {{\n    cuke::pending()\n}})?);\n",
                anchored(step)
            ));
        }

        snippet
    }
}

#[derive(Serialize)]
struct SnippetFile {
    #[serde(rename = "groupName")]
    group_name: String,
    steps: Vec<SnippetStep>,
}

#[derive(Serialize)]
struct SnippetStep {
    step: String,
    #[serde(rename = "className")]
    class_name: String,
}

impl SnippetDialect for YamlSnippets {
    fn generate(&self, steps: &[String]) -> String {
        let file = SnippetFile {
            group_name: "MyGroup".to_string(),
            steps: steps
                .iter()
                .enumerate()
                .map(|(idx, step)| SnippetStep {
                    step: anchored(step),
                    class_name: format!("MyStep{}", idx),
                })
                .collect(),
        };

        serde_yaml::to_string(&file).unwrap_or_else(|e| {
            warn!("Failed to render YAML snippets: {}", e);
            format!("# could not render snippets: {}\n", e)
        })
    }
}

impl SnippetDialectKind {
    pub fn dialect(self) -> Box<dyn SnippetDialect> {
        match self {
            SnippetDialectKind::Rust => Box::new(RustSnippets),
            SnippetDialectKind::Yaml => Box::new(YamlSnippets),
        }
    }
}
