//! Setup and teardown around the whole run and around each scenario

use crate::error::{CucumberError, HookPhase};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Setup/teardown pair.
///
/// All methods default to doing nothing, and [`should_run`](Hook::should_run)
/// defaults to accepting every scenario.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Whether this hook applies to a scenario with these tags.
    ///
    /// Ignored for the global hook.
    fn should_run(&self, _tags: &[String]) -> bool {
        true
    }

    async fn before(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn after(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// The global hook plus the ordered per-scenario hooks
#[derive(Default, Clone)]
pub struct Hooks {
    global: Option<Arc<dyn Hook>>,
    scenario: Vec<Arc<dyn Hook>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hook wrapping the entire run
    pub fn with_global<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.global = Some(Arc::new(hook));
        self
    }

    /// Append a per-scenario hook
    pub fn with_hook<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.scenario.push(Arc::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.scenario.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenario.is_empty()
    }

    /// Run the global `before`.
    ///
    /// If it fails, the global `after` is still attempted before the error
    /// is returned.
    pub async fn begin_global(&self) -> Result<GlobalScope<'_>, CucumberError> {
        let Some(hook) = self.global.as_deref() else {
            return Ok(GlobalScope { hook: None });
        };

        debug!("Running global before hook");
        if let Err(source) = hook.before().await {
            if let Err(e) = hook.after().await {
                warn!("Global after hook failed while unwinding: {:#}", e);
            }
            return Err(CucumberError::Hook {
                phase: HookPhase::Before,
                source,
            });
        }

        Ok(GlobalScope { hook: Some(hook) })
    }

    /// Run `before` of every hook matching `tags`, in registration order.
    ///
    /// When one fails, the hooks that already ran are unwound in reverse
    /// order and the failure is returned.
    pub async fn begin_scenario(&self, tags: &[String]) -> Result<ScenarioHooks<'_>, CucumberError> {
        let mut active: Vec<&dyn Hook> = Vec::new();

        for hook in self.scenario.iter().filter(|h| h.should_run(tags)) {
            if let Err(source) = hook.before().await {
                debug!("Scenario before hook failed, unwinding {} hooks", active.len());
                for done in active.iter().rev() {
                    if let Err(e) = done.after().await {
                        warn!("Scenario after hook failed while unwinding: {:#}", e);
                    }
                }
                return Err(CucumberError::Hook {
                    phase: HookPhase::Before,
                    source,
                });
            }
            active.push(hook.as_ref());
        }

        Ok(ScenarioHooks { active })
    }
}

/// A global hook whose `before` succeeded
pub struct GlobalScope<'a> {
    hook: Option<&'a dyn Hook>,
}

impl GlobalScope<'_> {
    /// Run the global `after` and combine it with the run's result.
    ///
    /// An error already carried by `result` takes precedence over an
    /// `after` failure.
    pub async fn finish<T>(self, result: Result<T, CucumberError>) -> Result<T, CucumberError> {
        let Some(hook) = self.hook else {
            return result;
        };

        debug!("Running global after hook");
        match (result, hook.after().await) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(source)) => Err(CucumberError::Hook {
                phase: HookPhase::After,
                source,
            }),
            (Err(e), after) => {
                if let Err(after_err) = after {
                    warn!("Global after hook failed on an error path: {:#}", after_err);
                }
                Err(e)
            }
        }
    }
}

/// Scenario hooks whose `before` succeeded, in the order they ran
pub struct ScenarioHooks<'a> {
    active: Vec<&'a dyn Hook>,
}

impl ScenarioHooks<'_> {
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Run every `after` in reverse order.
    ///
    /// All of them run even if one fails; the first failure is returned.
    pub async fn release(self) -> Result<(), CucumberError> {
        let mut first_error = None;

        for hook in self.active.iter().rev() {
            if let Err(source) = hook.after().await {
                if first_error.is_none() {
                    first_error = Some(source);
                } else {
                    warn!("Additional scenario after hook failure: {:#}", source);
                }
            }
        }

        match first_error {
            Some(source) => Err(CucumberError::Hook {
                phase: HookPhase::After,
                source,
            }),
            None => Ok(()),
        }
    }
}
