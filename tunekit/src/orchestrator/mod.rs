//! The orchestrator: module registry, loader, dependency resolver and
//! execution driver behind one explicit object.
//!
//! ## Lifecycle
//!
//! ```text
//! ModuleLibrary ──resolve──▶ load() ──▶ registry entry (Loaded)
//!                                │
//!                                └──▶ one Step per capability (Pipeline)
//!
//! init_all() ─▶ each init() may call requires() ─▶ pipeline converges
//! run()      ─▶ steps in pipeline order, statuses recorded
//! fini_all() ─▶ best-effort teardown, errors collected
//! ```
//!
//! There is no global state: every [`Orchestrator`] owns its own registry
//! and pipeline, so tests can run any number of independent pipelines.

mod driver;
mod loader;
mod resolver;

pub use driver::{InitContext, RunOutcome, RunReport, StepRecord};
pub use resolver::Resolution;

use crate::domain::{ModuleStatus, PhaseSet};
use crate::library::ModuleLibrary;
use crate::module::SharedModule;
use crate::pipeline::Pipeline;

/// One registered module and the registry-owned state around it.
pub(crate) struct ModuleEntry {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) options: Vec<String>,
    pub(crate) status: ModuleStatus,
    pub(crate) capabilities: PhaseSet,
    pub(crate) handle: SharedModule,
}

/// Read-only registry view used by reports and diagnostics.
pub struct ModuleView<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub status: ModuleStatus,
    pub capabilities: PhaseSet,
}

/// Owns the module registry and the step pipeline.
pub struct Orchestrator {
    library: ModuleLibrary,
    modules: Vec<ModuleEntry>,
    pipeline: Pipeline,
}

impl Orchestrator {
    #[must_use]
    pub fn new(library: ModuleLibrary) -> Self {
        Self { library, modules: Vec::new(), pipeline: Pipeline::new() }
    }

    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Iterate registered modules in registration order.
    pub fn modules(&self) -> impl Iterator<Item = ModuleView<'_>> {
        self.modules.iter().map(|e| ModuleView {
            name: &e.name,
            version: &e.version,
            status: e.status,
            capabilities: e.capabilities,
        })
    }

    /// Is a module with this name registered?
    #[must_use]
    pub fn available(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    #[must_use]
    pub fn module_status(&self, name: &str) -> Option<ModuleStatus> {
        self.entry(name).map(|e| e.status)
    }

    #[must_use]
    pub fn module_version(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|e| e.version.as_str())
    }

    pub(crate) fn entry(&self, name: &str) -> Option<&ModuleEntry> {
        self.modules.iter().find(|e| e.name == name)
    }

    pub(crate) fn entry_mut(&mut self, name: &str) -> Option<&mut ModuleEntry> {
        self.modules.iter_mut().find(|e| e.name == name)
    }
}
