//! Reading a step's doc string or data table argument

use crate::core::{DataTable, PickleArg};
use crate::error::{ArgKind, CucumberError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An argument view a step declares it reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgReader {
    /// Plain doc string text
    DocString,
    /// Table as rows of cells
    ExampleList,
    /// Table as header-keyed maps
    ExampleMap,
    /// Table decoded into records
    Examples,
}

impl ArgReader {
    pub fn expects(&self) -> ArgKind {
        match self {
            ArgReader::DocString => ArgKind::DocString,
            ArgReader::ExampleList | ArgReader::ExampleMap | ArgReader::Examples => {
                ArgKind::DataTable
            }
        }
    }
}

fn kind_of(arg: &PickleArg) -> ArgKind {
    match arg {
        PickleArg::DocString(_) => ArgKind::DocString,
        PickleArg::DataTable(_) => ArgKind::DataTable,
    }
}

/// Arguments read for one step invocation
#[derive(Debug, Clone, Default)]
pub struct StepArguments {
    doc_string: Option<String>,
    table: Option<DataTable>,
}

impl StepArguments {
    /// Populate the declared readers from the step's argument.
    ///
    /// Steps without an argument leave every reader empty. A reader whose
    /// kind differs from the argument's is an error.
    pub fn read(readers: &[ArgReader], argument: Option<&PickleArg>) -> Result<Self, CucumberError> {
        let mut arguments = Self::default();
        let Some(argument) = argument else {
            return Ok(arguments);
        };

        for reader in readers {
            match (reader.expects(), argument) {
                (ArgKind::DocString, PickleArg::DocString(doc)) => {
                    arguments.doc_string = Some(doc.content.clone());
                }
                (ArgKind::DataTable, PickleArg::DataTable(table)) => {
                    arguments.table = Some(table.clone());
                }
                (expected, found) => {
                    return Err(CucumberError::ArgumentTypeMismatch {
                        expected,
                        found: kind_of(found),
                    });
                }
            }
        }

        Ok(arguments)
    }

    pub fn doc_string(&self) -> Result<&str, CucumberError> {
        self.doc_string
            .as_deref()
            .ok_or(CucumberError::MissingArgument(ArgKind::DocString))
    }

    pub fn table(&self) -> Result<&DataTable, CucumberError> {
        self.table
            .as_ref()
            .ok_or(CucumberError::MissingArgument(ArgKind::DataTable))
    }

    pub fn lists(&self) -> Result<Vec<Vec<String>>, CucumberError> {
        Ok(self.table()?.as_lists())
    }

    pub fn maps(&self) -> Result<Vec<HashMap<String, String>>, CucumberError> {
        Ok(self.table()?.as_maps())
    }

    pub fn examples<T: DeserializeOwned>(&self) -> Result<Vec<T>, CucumberError> {
        self.table()?.typed().map_err(CucumberError::TableDecode)
    }
}
