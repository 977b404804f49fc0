//! Test utility functions for cuke engine scenarios

#![allow(dead_code)]

use async_trait::async_trait;
use cuke::{
    CucumberError, Cucumber, Envelope, Hook, Hooks, Pickle, PickleStep, Reporter, RunSummary,
    ScenarioState, Status, StepFn, StepRegistry,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared, ordered record of calls made during a run
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }
}

/// A notification received by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    FeatureBegin(String),
    ScenarioRunning { id: String, steps: usize },
    ScenarioFinished { id: String, status: Status },
    StepsUndefined(Vec<String>),
    FeatureEnd { feature: String, had_errors: bool },
}

/// Reporter that keeps every notification in order
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn undefined_reports(&self) -> Vec<Vec<String>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::StepsUndefined(steps) => Some(steps),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ReportEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn on_feature_begin(&self, feature: &str) {
        self.push(ReportEvent::FeatureBegin(feature.to_string()));
    }

    fn on_scenario_running(&self, state: &ScenarioState) {
        self.push(ReportEvent::ScenarioRunning {
            id: state.id.clone(),
            steps: state.steps().len(),
        });
    }

    fn on_scenario_finished(&self, state: &ScenarioState, _: Duration, _: Duration) {
        self.push(ReportEvent::ScenarioFinished {
            id: state.id.clone(),
            status: state.status(),
        });
    }

    fn on_steps_undefined(&self, steps: &[String]) {
        self.push(ReportEvent::StepsUndefined(steps.to_vec()));
    }

    fn on_feature_end(&self, feature: &str, had_errors: bool, _: Duration, _: Duration) {
        self.push(ReportEvent::FeatureEnd {
            feature: feature.to_string(),
            had_errors,
        });
    }
}

/// Hook that logs `<name>.before` / `<name>.after` and can be told to fail
pub struct LoggingHook {
    name: String,
    log: CallLog,
    tag: Option<String>,
    fail_before: bool,
    fail_after: bool,
}

impl LoggingHook {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            tag: None,
            fail_before: false,
            fail_after: false,
        }
    }

    /// Only apply to scenarios carrying `tag`
    pub fn tagged(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn failing_before(mut self) -> Self {
        self.fail_before = true;
        self
    }

    pub fn failing_after(mut self) -> Self {
        self.fail_after = true;
        self
    }
}

#[async_trait]
impl Hook for LoggingHook {
    fn should_run(&self, tags: &[String]) -> bool {
        self.tag.as_ref().map_or(true, |wanted| tags.contains(wanted))
    }

    async fn before(&self) -> anyhow::Result<()> {
        self.log.push(format!("{}.before", self.name));
        if self.fail_before {
            anyhow::bail!("{} before failed", self.name);
        }
        Ok(())
    }

    async fn after(&self) -> anyhow::Result<()> {
        self.log.push(format!("{}.after", self.name));
        if self.fail_after {
            anyhow::bail!("{} after failed", self.name);
        }
        Ok(())
    }
}

/// Step that logs its pattern each time it is invoked
pub fn logged_step(pattern: &str, log: &CallLog) -> StepFn {
    let log = log.clone();
    let entry = format!("step:{}", pattern);
    StepFn::new(pattern, move |_, _| {
        log.push(entry.clone());
        Ok(())
    })
    .unwrap()
}

/// Step that logs its pattern and then fails
pub fn failing_step(pattern: &str, log: &CallLog) -> StepFn {
    let log = log.clone();
    let entry = format!("step:{}", pattern);
    StepFn::new(pattern, move |_, _| {
        log.push(entry.clone());
        anyhow::bail!("step failed on purpose")
    })
    .unwrap()
}

/// Step that logs its pattern and then reports pending
pub fn pending_step(pattern: &str, log: &CallLog) -> StepFn {
    let log = log.clone();
    let entry = format!("step:{}", pattern);
    StepFn::new(pattern, move |_, _| {
        log.push(entry.clone());
        cuke::pending()
    })
    .unwrap()
}

/// Build a pickle envelope with plain text steps
pub fn pickle(id: &str, steps: &[&str]) -> Envelope {
    Envelope::Pickle(pickle_with(id, steps.iter().map(|s| PickleStep::new(*s))))
}

/// Build a pickle from prepared steps
pub fn pickle_with(id: &str, steps: impl IntoIterator<Item = PickleStep>) -> Pickle {
    steps
        .into_iter()
        .fold(Pickle::new(id, format!("Scenario {}", id)), Pickle::with_step)
}

/// Outcome of running envelopes through a fresh engine
pub struct TestRun {
    pub result: Result<RunSummary, CucumberError>,
    pub reporter: Arc<RecordingReporter>,
}

impl TestRun {
    pub fn summary(&self) -> &RunSummary {
        match &self.result {
            Ok(summary) => summary,
            Err(e) => panic!("run failed: {}", e),
        }
    }

    pub fn error(&self) -> &CucumberError {
        match &self.result {
            Ok(_) => panic!("run unexpectedly succeeded"),
            Err(e) => e,
        }
    }
}

/// Run `envelopes` as feature "test.feature"
pub async fn run_envelopes(registry: StepRegistry, hooks: Hooks, envelopes: Vec<Envelope>) -> TestRun {
    let reporter = Arc::new(RecordingReporter::default());
    let engine = Cucumber::new(registry)
        .with_hooks(hooks)
        .with_reporter(reporter.clone());

    let result = engine.run_envelopes("test.feature", envelopes).await;
    TestRun { result, reporter }
}

/// Assert the per-step statuses recorded for scenario `id`
pub fn assert_step_statuses(summary: &RunSummary, id: &str, expected: &[Status]) {
    let state = summary
        .scenario(id)
        .unwrap_or_else(|| panic!("Scenario {} was not recorded", id));
    let actual: Vec<Status> = state.steps().iter().map(|s| s.status()).collect();
    assert_eq!(actual, expected, "Step statuses of scenario {}", id);
}

/// Assert the aggregate status of scenario `id`
pub fn assert_scenario_status(summary: &RunSummary, id: &str, expected: Status) {
    let state = summary
        .scenario(id)
        .unwrap_or_else(|| panic!("Scenario {} was not recorded", id));
    assert_eq!(state.status(), expected, "Status of scenario {}", id);
}
