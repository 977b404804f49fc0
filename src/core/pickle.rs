//! Pickle domain model, as delivered by the gherkin parser

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parse event from the gherkin message stream.
///
/// Each NDJSON line carries exactly one of these keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Envelope {
    Pickle(Pickle),
    Source(Source),
    /// The parsed AST; the engine never looks inside it
    GherkinDocument(serde_json::Value),
    ParseError(ParseError),
}

/// Raw feature source echoed back by the parser
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub uri: String,
    pub data: String,
}

/// Malformed input reported by the parser
#[derive(Debug, Clone, Deserialize)]
pub struct ParseError {
    pub message: String,
    #[serde(default)]
    pub source: Option<SourceReference>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceReference {
    #[serde(default)]
    pub uri: Option<String>,
}

impl ParseError {
    /// Message prefixed with the offending file, when known
    pub fn describe(&self) -> String {
        match self.source.as_ref().and_then(|s| s.uri.as_ref()) {
            Some(uri) => format!("{}: {}", uri, self.message),
            None => self.message.clone(),
        }
    }
}

/// A concrete, example-expanded scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickle {
    /// Stable identifier
    pub id: String,

    /// Feature file the scenario came from
    #[serde(default)]
    pub uri: String,

    /// Display name
    pub name: String,

    /// Tags, inherited from feature and rule
    #[serde(default)]
    pub tags: Vec<PickleTag>,

    /// Steps in execution order
    #[serde(default)]
    pub steps: Vec<PickleStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleTag {
    pub name: String,
}

impl Pickle {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uri: String::new(),
            name: name.into(),
            tags: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(PickleTag { name: tag.into() });
        self
    }

    pub fn with_step(mut self, step: PickleStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Tag names, in declaration order
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.name.clone()).collect()
    }
}

/// A single literal step line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickleStep {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<PickleArg>,
}

impl PickleStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            argument: None,
        }
    }

    pub fn with_doc_string(mut self, content: impl Into<String>) -> Self {
        self.argument = Some(PickleArg::DocString(DocString {
            content: content.into(),
        }));
        self
    }

    pub fn with_table(mut self, table: DataTable) -> Self {
        self.argument = Some(PickleArg::DataTable(table));
        self
    }
}

/// Structured argument attached to a step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PickleArg {
    DocString(DocString),
    DataTable(DataTable),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocString {
    pub content: String,
}

/// Rows of string cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub value: String,
}

impl DataTable {
    /// Build a table from plain rows
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| TableRow {
                cells: row
                    .into_iter()
                    .map(|value| TableCell { value: value.into() })
                    .collect(),
            })
            .collect();
        Self { rows }
    }

    pub fn as_lists(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.value.clone()).collect())
            .collect()
    }

    /// First row is the header; every later row becomes a map keyed by it.
    ///
    /// Cells past the end of the header are dropped and a repeated header
    /// key keeps the right-most value.
    pub fn as_maps(&self) -> Vec<HashMap<String, String>> {
        let Some((header, body)) = self.rows.split_first() else {
            return Vec::new();
        };

        body.iter()
            .map(|row| {
                header
                    .cells
                    .iter()
                    .zip(&row.cells)
                    .map(|(key, cell)| (key.value.clone(), cell.value.clone()))
                    .collect()
            })
            .collect()
    }

    /// Decode the map view into records whose field names match the header
    pub fn typed<T: DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        let maps = serde_json::to_value(self.as_maps())?;
        serde_json::from_value(maps)
    }
}
