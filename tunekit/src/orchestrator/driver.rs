//! The execution driver: module initialization, the pipeline walk and
//! best-effort teardown.

use super::Orchestrator;
use crate::domain::{FiniError, ModuleStatus, Order, Phase, ResolveError, ResultCode, RunError};
use crate::orchestrator::Resolution;
use log::{debug, info, warn};
use serde::Serialize;
use std::rc::Rc;

/// Context handed to a module's `init` hook.
///
/// This is the only channel a module has back into the orchestrator, and it
/// exists only for the duration of `init`: phase hooks run without it, which
/// is what keeps the pipeline immutable during [`Orchestrator::run`].
pub struct InitContext<'a> {
    orchestrator: &'a mut Orchestrator,
    name: &'a str,
    options: &'a [String],
}

impl InitContext<'_> {
    /// Name this module was registered under.
    #[must_use]
    pub fn module(&self) -> &str {
        self.name
    }

    /// Options accumulated for this module before init.
    #[must_use]
    pub fn options(&self) -> &[String] {
        self.options
    }

    /// Is the named module registered?
    #[must_use]
    pub fn available(&self, name: &str) -> bool {
        self.orchestrator.available(name)
    }

    /// Declare an ordering constraint for one of this module's phases.
    /// See [`Orchestrator::requires`].
    pub fn requires(
        &mut self,
        pa: Phase,
        b: Option<&str>,
        pb: Phase,
        order: Order,
    ) -> Result<Resolution, ResolveError> {
        self.orchestrator.requires(self.name, pa, b, pb, order)
    }
}

/// Outcome of one executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub module: String,
    pub phase: Phase,
    pub code: ResultCode,
}

/// How a pipeline walk ended.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every step ran and reported success.
    Completed,
    /// A step answered an informational code; the remaining steps were
    /// skipped but the run still counts as reportable progress.
    Stopped { module: String, phase: Phase, code: ResultCode },
}

/// Everything a finished (or informationally stopped) run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub records: Vec<StepRecord>,
    pub outcome: RunOutcome,
}

impl Orchestrator {
    /// Initialize one named module and mark it `Initialized`.
    pub(crate) fn init_one(&mut self, name: &str) -> Result<(), RunError> {
        let Some(entry) = self.entry(name) else {
            return Err(RunError::NotInitialized { name: name.to_string() });
        };
        let handle = Rc::clone(&entry.handle);
        let options = entry.options.clone();

        let code = handle.borrow_mut().init(&mut InitContext {
            orchestrator: self,
            name,
            options: &options,
        });
        if !code.is_success() {
            return Err(RunError::InitFailed { name: name.to_string(), code });
        }
        if let Some(entry) = self.entry_mut(name) {
            entry.status = ModuleStatus::Initialized;
        }
        debug!("module {name} initialized");
        Ok(())
    }

    /// Initialize every module still in `Loaded` status.
    ///
    /// The walk is index-based because `requires` calls made by the modules
    /// may auto-load dependencies mid-walk; those arrive already
    /// initialized and are skipped. Any init failure aborts the whole run.
    pub fn init_all(&mut self) -> Result<(), RunError> {
        let mut index = 0;
        while index < self.modules.len() {
            if self.modules[index].status == ModuleStatus::Loaded {
                let name = self.modules[index].name.clone();
                self.init_one(&name)?;
            }
            index += 1;
        }

        let modules: Vec<&str> = self.modules.iter().map(|e| e.name.as_str()).collect();
        debug!("modules: [{}]", modules.join(", "));
        let steps: Vec<String> =
            self.pipeline.iter().map(|s| format!("{}/{}", s.name(), s.phase())).collect();
        debug!("steps order: {}", steps.join(" >> "));
        Ok(())
    }

    /// Walk the pipeline strictly in step order, recording each step's
    /// result code.
    ///
    /// Abort-worthy codes fail the run; informational codes stop it early
    /// but still yield a report. The pipeline held at the moment this
    /// starts is exactly what runs: phase hooks have no way back into the
    /// orchestrator.
    pub fn run(&mut self) -> Result<RunReport, RunError> {
        let mut records = Vec::with_capacity(self.pipeline.len());

        for index in 0..self.pipeline.len() {
            let (name, phase, handle) = {
                let step = self.pipeline.step(index);
                (step.name().to_string(), step.phase(), Rc::clone(step.handle()))
            };
            if self.module_status(&name) != Some(ModuleStatus::Initialized) {
                return Err(RunError::NotInitialized { name });
            }

            info!("running {name}/{phase}");
            let code = handle.borrow_mut().run_phase(phase);
            self.pipeline.record(index, code);
            records.push(StepRecord { module: name.clone(), phase, code });

            if code.is_fatal() {
                return Err(RunError::StepFailed { module: name, phase, code });
            }
            if code.is_informational() {
                info!("pipeline stopped at {name}/{phase} ({code:?})");
                return Ok(RunReport {
                    records,
                    outcome: RunOutcome::Stopped { module: name, phase, code },
                });
            }
        }

        Ok(RunReport { records, outcome: RunOutcome::Completed })
    }

    /// Finalize every module not already finalized, best-effort.
    ///
    /// Teardown never aborts early: all failures are collected and
    /// returned. Modules that fail keep their previous status so a later
    /// call retries them.
    pub fn fini_all(&mut self) -> Vec<FiniError> {
        let mut errors = Vec::new();
        for index in 0..self.modules.len() {
            if self.modules[index].status == ModuleStatus::Finalized {
                continue;
            }
            let name = self.modules[index].name.clone();
            let handle = Rc::clone(&self.modules[index].handle);
            let code = handle.borrow_mut().fini();
            if code.is_success() {
                self.modules[index].status = ModuleStatus::Finalized;
                debug!("module {name} finalized");
            } else {
                warn!("module {name} failed to finalize ({code:?})");
                errors.push(FiniError { name, code });
            }
        }
        errors
    }
}
