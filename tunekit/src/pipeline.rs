//! The ordered step list and its structural invariant.
//!
//! A [`Step`] is one scheduled (module, phase) execution unit; the
//! [`Pipeline`] is the ordered list the execution driver walks. Insertion
//! order is execution order. The only invariant the pipeline enforces on its
//! own is the singleton-compiler rule: at most one step may carry
//! [`Phase::Compile`], and a second registration is an error, never a silent
//! merge.
//!
//! Reordering uses stable relocations on a `Vec`: one step is removed and
//! reinserted, every other step keeps its relative order.

use crate::domain::{Phase, PipelineError, ResultCode};
use crate::module::SharedModule;
use std::rc::Rc;

/// One scheduled (module, phase) execution unit.
pub struct Step {
    name: String,
    module: SharedModule,
    phase: Phase,
    status: ResultCode,
}

impl Step {
    fn new(name: &str, module: &SharedModule, phase: Phase) -> Self {
        Self {
            name: name.to_string(),
            module: Rc::clone(module),
            phase,
            status: ResultCode::Undefined,
        }
    }

    /// Owning module's name; the lookup key for dependency resolution.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Recorded outcome of the last run; `Undefined` until the step ran.
    #[must_use]
    pub fn status(&self) -> ResultCode {
        self.status
    }

    pub(crate) fn handle(&self) -> &SharedModule {
        &self.module
    }

    /// Fresh copy with the same module handle and phase; status resets.
    fn duplicate(&self) -> Self {
        Self::new(&self.name, &self.module, self.phase)
    }
}

/// The ordered list of steps the execution driver runs.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    #[must_use]
    pub fn step(&self, index: usize) -> &Step {
        &self.steps[index]
    }

    /// Index of the first step matching (module, phase).
    #[must_use]
    pub fn position(&self, name: &str, phase: Phase) -> Option<usize> {
        self.steps.iter().position(|s| s.name == name && s.phase == phase)
    }

    /// Index of the first step with the given phase, regardless of module.
    #[must_use]
    pub fn first_of_phase(&self, phase: Phase) -> Option<usize> {
        self.steps.iter().position(|s| s.phase == phase)
    }

    fn compiler(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.phase == Phase::Compile)
    }

    /// Register one step for (module, phase) under the default placement
    /// rule. Idempotent: re-adding an existing (module, phase) is a no-op.
    ///
    /// Placement: with a compile step present the new step goes to position
    /// 1 (right after the pipeline head) when the list is long enough,
    /// otherwise it is appended; without one it goes to the front. Later
    /// movement is the dependency resolver's job.
    pub(crate) fn add_phase(
        &mut self,
        name: &str,
        module: &SharedModule,
        phase: Phase,
    ) -> Result<(), PipelineError> {
        if self.position(name, phase).is_some() {
            return Ok(());
        }
        if phase == Phase::Compile {
            if let Some(existing) = self.compiler() {
                return Err(PipelineError::CompilerConflict { existing: existing.name.clone() });
            }
        }
        let step = Step::new(name, module, phase);
        if self.compiler().is_some() {
            let at = 1.min(self.steps.len());
            self.steps.insert(at, step);
        } else {
            self.steps.insert(0, step);
        }
        Ok(())
    }

    /// Remove every step owned by `name`. Returns how many were removed.
    pub(crate) fn retract(&mut self, name: &str) -> usize {
        let before = self.steps.len();
        self.steps.retain(|s| s.name != name);
        before - self.steps.len()
    }

    /// Move the step at `from` to immediately after the step currently at
    /// `anchor`. Stable: all other steps keep their relative order.
    pub(crate) fn move_after(&mut self, from: usize, anchor: usize) {
        let step = self.steps.remove(from);
        let anchor = if from < anchor { anchor - 1 } else { anchor };
        self.steps.insert(anchor + 1, step);
    }

    /// Move the step at `from` to immediately before the step currently at
    /// `anchor`.
    pub(crate) fn move_before(&mut self, from: usize, anchor: usize) {
        let step = self.steps.remove(from);
        let anchor = if from < anchor { anchor - 1 } else { anchor };
        self.steps.insert(anchor, step);
    }

    /// Move the step at `from` to the head of the pipeline.
    pub(crate) fn move_front(&mut self, from: usize) {
        let step = self.steps.remove(from);
        self.steps.insert(0, step);
    }

    /// Move the step at `from` to the tail of the pipeline.
    pub(crate) fn move_back(&mut self, from: usize) {
        let step = self.steps.remove(from);
        self.steps.push(step);
    }

    /// Insert a duplicate of the step at `source` so that the copy lands at
    /// index `at`. The source step itself is untouched.
    pub(crate) fn clone_at(&mut self, source: usize, at: usize) {
        let copy = self.steps[source].duplicate();
        self.steps.insert(at, copy);
    }

    pub(crate) fn record(&mut self, index: usize, code: ResultCode) {
        self.steps[index].status = code;
    }
}
