//! Main execution engine - runs the pickles of one feature

use crate::{
    core::{Envelope, Pickle, ScenarioState, StateContainer},
    error::CucumberError,
    execution::{ExecutionResult, StepExecutor},
    gherkin::PickleSource,
    hooks::Hooks,
    report::{NoReporter, Reporter},
    step::StepRegistry,
};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Decides from a pickle's tags whether it runs
pub type TagPredicate = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

/// Results of one feature run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Final scenario states keyed by pickle id
    pub scenarios: HashMap<String, ScenarioState>,

    /// Pickle ids in the order they first ran
    pub order: Vec<String>,

    /// Sorted, deduplicated undefined step texts
    pub undefined_steps: Vec<String>,

    /// Time spent inside steps
    pub step_elapsed: Duration,

    /// Time from the global `before` to the end of the feature, scenario
    /// hooks included. The global `after` runs later and is not counted.
    pub total_elapsed: Duration,

    /// Sticky across id collisions, unlike `scenarios`
    errors_seen: bool,
}

impl RunSummary {
    pub fn scenario(&self, id: &str) -> Option<&ScenarioState> {
        self.scenarios.get(id)
    }

    /// Scenario states in run order
    pub fn ordered(&self) -> impl Iterator<Item = &ScenarioState> {
        self.order.iter().filter_map(|id| self.scenarios.get(id))
    }

    /// Whether any scenario ended in something other than success.
    ///
    /// Counts every scenario that ran, including ones whose result was
    /// later replaced by a pickle with the same id.
    pub fn had_errors(&self) -> bool {
        self.errors_seen
    }

    fn record(&mut self, state: ScenarioState, step_elapsed: Duration) {
        self.step_elapsed += step_elapsed;
        self.errors_seen |= !state.is_success();
        if !self.scenarios.contains_key(&state.id) {
            self.order.push(state.id.clone());
        } else {
            warn!("Pickle id {} seen twice, keeping the later result", state.id);
        }
        self.scenarios.insert(state.id.clone(), state);
    }

    fn collect_undefined(&mut self) {
        let texts: BTreeSet<&str> = self
            .scenarios
            .values()
            .flat_map(|s| s.undefined_steps())
            .collect();
        self.undefined_steps = texts.into_iter().map(str::to_string).collect();
    }
}

/// Runs features against a step registry, hooks and a reporter
pub struct Cucumber {
    executor: StepExecutor,
    hooks: Hooks,
    reporter: Arc<dyn Reporter>,
    tag_filter: TagPredicate,
}

impl Cucumber {
    pub fn new(registry: StepRegistry) -> Self {
        Self {
            executor: StepExecutor::new(registry),
            hooks: Hooks::new(),
            reporter: Arc::new(NoReporter),
            tag_filter: Box::new(|_| true),
        }
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Only run pickles whose tags satisfy `filter`
    pub fn with_tag_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.tag_filter = Box::new(filter);
        self
    }

    pub fn registry(&self) -> &StepRegistry {
        self.executor.registry()
    }

    /// Parse `feature` with `source` and run its pickles.
    ///
    /// The global hook wraps parsing and execution; its `after` runs even
    /// when the run fails.
    pub async fn run(&self, source: &dyn PickleSource, feature: &Path) -> Result<RunSummary, CucumberError> {
        let name = feature.display().to_string();
        let started = Instant::now();
        let global = self.hooks.begin_global().await?;

        let result = match source.envelopes(feature).await {
            Ok(envelopes) => self.run_feature(&name, envelopes, started).await,
            Err(e) => Err(e),
        };

        global.finish(result).await
    }

    /// Run already-parsed events as the feature called `feature`
    pub async fn run_envelopes<I>(&self, feature: &str, envelopes: I) -> Result<RunSummary, CucumberError>
    where
        I: IntoIterator<Item = Envelope>,
    {
        let started = Instant::now();
        let global = self.hooks.begin_global().await?;
        let result = self.run_feature(feature, envelopes, started).await;
        global.finish(result).await
    }

    async fn run_feature<I>(
        &self,
        feature: &str,
        envelopes: I,
        started: Instant,
    ) -> Result<RunSummary, CucumberError>
    where
        I: IntoIterator<Item = Envelope>,
    {
        info!("Running feature {}", feature);
        self.reporter.on_feature_begin(feature);

        let mut summary = RunSummary::default();

        for envelope in envelopes {
            match envelope {
                Envelope::Pickle(pickle) => {
                    if let Some((state, step_elapsed)) = self.run_pickle(&pickle).await? {
                        summary.record(state, step_elapsed);
                    }
                }
                Envelope::ParseError(e) => {
                    return Err(CucumberError::ParseFailure(e.describe()));
                }
                Envelope::Source(_) | Envelope::GherkinDocument(_) => {}
            }
        }

        summary.collect_undefined();
        if !summary.undefined_steps.is_empty() {
            self.reporter.on_steps_undefined(&summary.undefined_steps);
        }

        summary.total_elapsed = started.elapsed();
        let had_errors = summary.had_errors();
        info!(
            "Feature {} finished: {} scenarios, errors: {}",
            feature,
            summary.scenarios.len(),
            had_errors
        );
        self.reporter
            .on_feature_end(feature, had_errors, summary.step_elapsed, summary.total_elapsed);

        Ok(summary)
    }

    /// Run one pickle, or `None` if the tag filter rejects it
    async fn run_pickle(&self, pickle: &Pickle) -> Result<Option<(ScenarioState, Duration)>, CucumberError> {
        let tags = pickle.tag_names();
        if !(self.tag_filter)(&tags) {
            debug!("Skipping scenario '{}' with tags {:?}", pickle.name, tags);
            return Ok(None);
        }

        info!("Running scenario '{}'", pickle.name);
        let started = Instant::now();
        let hooks = self.hooks.begin_scenario(&tags).await?;

        let mut container = StateContainer::new();
        let mut state = ScenarioState::new(&pickle.id, &pickle.name);
        let mut step_elapsed = Duration::ZERO;
        let mut fatal = None;

        for step in &pickle.steps {
            let step_started = Instant::now();
            let result = self.executor.execute(step, &mut container, &state).await;
            step_elapsed += step_started.elapsed();

            match result {
                Ok(ExecutionResult::Outcome(outcome)) => state.record(outcome),
                Ok(ExecutionResult::Skipped) => {}
                Err(e) => {
                    fatal = Some(e);
                    break;
                }
            }
            self.reporter.on_scenario_running(&state);
        }
        drop(container);

        let released = hooks.release().await;
        if let Some(e) = fatal {
            if let Err(hook_err) = released {
                warn!("Scenario after hook failed on an error path: {}", hook_err);
            }
            return Err(e);
        }
        released?;

        let total = started.elapsed();
        info!("Scenario '{}' finished: {}", pickle.name, state.status());
        self.reporter.on_scenario_finished(&state, step_elapsed, total);

        Ok(Some((state, step_elapsed)))
    }
}
