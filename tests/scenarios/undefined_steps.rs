//! Test: Undefined steps - discovery, aggregation and reporting

use crate::helpers::*;
use cuke::{Hooks, Status, StepRegistry};

/// A pickle without steps passes
#[tokio::test]
async fn test_empty_scenario_succeeds() {
    let run = run_envelopes(StepRegistry::new(), Hooks::new(), vec![pickle("empty", &[])]).await;

    let summary = run.summary();
    assert_scenario_status(summary, "empty", Status::Success);
    assert!(!summary.had_errors());
    assert!(run.reporter.undefined_reports().is_empty());
}

/// Every unmatched step is undefined, and none of the registered handlers run
#[tokio::test]
async fn test_unmatched_steps_are_undefined() {
    let log = CallLog::default();
    let registry = StepRegistry::new().with_step(logged_step("a known step", &log));

    let run = run_envelopes(
        registry,
        Hooks::new(),
        vec![pickle("s1", &["an unknown step", "another unknown step"])],
    )
    .await;

    let summary = run.summary();
    assert_step_statuses(summary, "s1", &[Status::Undefined, Status::Undefined]);
    assert_scenario_status(summary, "s1", Status::Undefined);
    assert!(summary.had_errors());
    assert!(log.entries().is_empty());
}

/// Identical undefined texts across scenarios are reported once, sorted
#[tokio::test]
async fn test_undefined_steps_are_deduplicated() {
    let run = run_envelopes(
        StepRegistry::new(),
        Hooks::new(),
        vec![
            pickle("s1", &["the shop is open", "I buy a cucumber"]),
            pickle("s2", &["the shop is open"]),
        ],
    )
    .await;

    assert_eq!(
        run.summary().undefined_steps,
        vec!["I buy a cucumber", "the shop is open"]
    );
    assert_eq!(
        run.reporter.undefined_reports(),
        vec![vec!["I buy a cucumber".to_string(), "the shop is open".to_string()]]
    );
}

/// Undefined steps after a failure are still discovered
#[tokio::test]
async fn test_undefined_steps_found_after_failure() {
    let log = CallLog::default();
    let registry = StepRegistry::new()
        .with_step(failing_step("it breaks", &log))
        .with_step(logged_step("it works", &log));

    let run = run_envelopes(
        registry,
        Hooks::new(),
        vec![pickle("s1", &["it breaks", "it works", "nobody wrote this"])],
    )
    .await;

    let summary = run.summary();
    assert_step_statuses(summary, "s1", &[Status::Failure, Status::Undefined]);
    assert_eq!(summary.undefined_steps, vec!["nobody wrote this"]);
    assert_eq!(log.entries(), vec!["step:it breaks"]);
}

/// Reporter sees the feature bracketed, progress after each step and one result per scenario
#[tokio::test]
async fn test_reporter_notifications_in_order() {
    let log = CallLog::default();
    let registry = StepRegistry::new().with_step(logged_step("it works", &log));

    let run = run_envelopes(
        registry,
        Hooks::new(),
        vec![pickle("s1", &["it works", "a missing step"]), pickle("s2", &[])],
    )
    .await;

    assert_eq!(
        run.reporter.events(),
        vec![
            ReportEvent::FeatureBegin("test.feature".to_string()),
            ReportEvent::ScenarioRunning { id: "s1".to_string(), steps: 1 },
            ReportEvent::ScenarioRunning { id: "s1".to_string(), steps: 2 },
            ReportEvent::ScenarioFinished { id: "s1".to_string(), status: Status::Undefined },
            ReportEvent::ScenarioFinished { id: "s2".to_string(), status: Status::Success },
            ReportEvent::StepsUndefined(vec!["a missing step".to_string()]),
            ReportEvent::FeatureEnd { feature: "test.feature".to_string(), had_errors: true },
        ]
    );
}

/// Running the same pickles twice gives the same aggregates
#[tokio::test]
async fn test_rerun_is_idempotent() {
    let registry = || {
        let log = CallLog::default();
        StepRegistry::new()
            .with_step(logged_step("it works", &log))
            .with_step(failing_step("it breaks", &log))
    };
    let envelopes = || {
        vec![
            pickle("a", &["it works"]),
            pickle("b", &["it works", "it breaks"]),
            pickle("c", &["missing"]),
        ]
    };

    let first = run_envelopes(registry(), Hooks::new(), envelopes()).await;
    let second = run_envelopes(registry(), Hooks::new(), envelopes()).await;

    for id in ["a", "b", "c"] {
        assert_eq!(
            first.summary().scenario(id).unwrap().status(),
            second.summary().scenario(id).unwrap().status()
        );
    }
    assert_eq!(first.summary().undefined_steps, second.summary().undefined_steps);
}

/// A later pickle with a colliding id replaces the earlier result, but its failure still counts
#[tokio::test]
async fn test_id_collision_last_wins() {
    let log = CallLog::default();
    let registry = StepRegistry::new().with_step(logged_step("it works", &log));

    let run = run_envelopes(
        registry,
        Hooks::new(),
        vec![pickle("same", &["missing"]), pickle("same", &["it works"])],
    )
    .await;

    let summary = run.summary();
    assert_eq!(summary.scenarios.len(), 1);
    assert_scenario_status(summary, "same", Status::Success);
    assert!(summary.undefined_steps.is_empty());
    assert!(summary.had_errors());
    assert!(run.reporter.events().contains(&ReportEvent::FeatureEnd {
        feature: "test.feature".to_string(),
        had_errors: true,
    }));
}
