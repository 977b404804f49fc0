//! Test: Doc string and data table arguments

use crate::helpers::*;
use cuke::error::{ArgKind, CucumberError};
use cuke::{check_eq, ArgReader, DataTable, Hooks, PickleStep, Status, StepFn, StepRegistry};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Record {
    a: String,
    b: String,
}

fn header_table() -> DataTable {
    DataTable::from_rows([["a", "b"], ["1", "2"]])
}

/// A table converts to header-keyed maps and decodes into records
#[tokio::test]
async fn test_table_maps_and_records() {
    let seen: Arc<Mutex<Option<(Vec<HashMap<String, String>>, Vec<Record>)>>> = Arc::default();
    let sink = seen.clone();
    let registry = StepRegistry::new().with_step(
        StepFn::new("these records:", move |_, ctx| {
            let maps = ctx.arguments().maps()?;
            let records = ctx.arguments().examples::<Record>()?;
            *sink.lock().unwrap() = Some((maps, records));
            Ok(())
        })
        .unwrap()
        .with_reader(ArgReader::ExampleMap)
        .with_reader(ArgReader::Examples),
    );

    let step = PickleStep::new("these records:").with_table(header_table());
    let run = run_envelopes(
        registry,
        Hooks::new(),
        vec![cuke::Envelope::Pickle(pickle_with("s1", [step]))],
    )
    .await;

    assert_scenario_status(run.summary(), "s1", Status::Success);
    let (maps, records) = seen.lock().unwrap().clone().unwrap();
    let expected: HashMap<String, String> =
        [("a", "1"), ("b", "2")].into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    assert_eq!(maps, vec![expected]);
    assert_eq!(records, vec![Record { a: "1".into(), b: "2".into() }]);
}

/// Doc string content reaches the handler verbatim
#[tokio::test]
async fn test_doc_string_argument() {
    let registry = StepRegistry::new().with_step(
        StepFn::new("the note reads:", |_, ctx| {
            check_eq(ctx.arguments().doc_string()?, "line one\nline two")?;
            Ok(())
        })
        .unwrap()
        .with_reader(ArgReader::DocString),
    );

    let step = PickleStep::new("the note reads:").with_doc_string("line one\nline two");
    let run = run_envelopes(
        registry,
        Hooks::new(),
        vec![cuke::Envelope::Pickle(pickle_with("s1", [step]))],
    )
    .await;

    assert_scenario_status(run.summary(), "s1", Status::Success);
}

/// A doc string reader handed a table fails the step without invoking it
#[tokio::test]
async fn test_argument_kind_mismatch() {
    let log = CallLog::default();
    let registry = StepRegistry::new()
        .with_step(logged_step("the note reads:", &log).with_reader(ArgReader::DocString));

    let step = PickleStep::new("the note reads:").with_table(header_table());
    let run = run_envelopes(
        registry,
        Hooks::new(),
        vec![cuke::Envelope::Pickle(pickle_with("s1", [step]))],
    )
    .await;

    let summary = run.summary();
    assert_step_statuses(summary, "s1", &[Status::Failure]);
    assert!(log.entries().is_empty());

    let error = summary.scenario("s1").unwrap().steps()[0].error().unwrap();
    assert!(matches!(
        error.downcast_ref::<CucumberError>(),
        Some(CucumberError::ArgumentTypeMismatch {
            expected: ArgKind::DocString,
            found: ArgKind::DataTable,
        })
    ));
}

/// Records with missing columns fail to decode, failing the step
#[tokio::test]
async fn test_table_decode_error_fails_step() {
    let registry = StepRegistry::new().with_step(
        StepFn::new("these records:", |_, ctx| {
            ctx.arguments().examples::<Record>()?;
            Ok(())
        })
        .unwrap()
        .with_reader(ArgReader::Examples),
    );

    let step = PickleStep::new("these records:").with_table(DataTable::from_rows([["a"], ["1"]]));
    let run = run_envelopes(
        registry,
        Hooks::new(),
        vec![cuke::Envelope::Pickle(pickle_with("s1", [step]))],
    )
    .await;

    assert_step_statuses(run.summary(), "s1", &[Status::Failure]);
}
