//! Module loading, unloading and option handling.

use super::{ModuleEntry, Orchestrator};
use crate::domain::{LoadError, ModuleStatus, Phase, ResultCode};
use crate::module::SharedModule;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

impl Orchestrator {
    /// Resolve `name` through the library search path and register it.
    ///
    /// Idempotent: a name that is already registered returns `Ok` without
    /// touching the module. On success the module's `load` hook has run,
    /// its version and capabilities are cached, and one pipeline step per
    /// capability is registered. Any failure discards the partially
    /// constructed registration.
    pub fn load(&mut self, name: &str) -> Result<(), LoadError> {
        if self.available(name) {
            debug!("module {name} already loaded");
            return Ok(());
        }

        let Some(module) = self.library.resolve(name) else {
            return Err(LoadError::NotFound(name.to_string()));
        };
        let handle: SharedModule = Rc::new(RefCell::new(module));

        let code = handle.borrow_mut().load();
        if !code.is_success() {
            return Err(LoadError::Rejected { name: name.to_string(), code });
        }

        let (version, capabilities) = {
            let module = handle.borrow();
            (module.version().to_string(), module.capabilities())
        };

        self.modules.push(ModuleEntry {
            name: name.to_string(),
            version: version.clone(),
            options: Vec::new(),
            status: ModuleStatus::Loaded,
            capabilities,
            handle: Rc::clone(&handle),
        });

        // Register capabilities in reverse workflow order: the placement
        // rule inserts at the head (or right after the compiler), so the
        // reversal leaves each module's own steps in workflow order.
        for phase in Phase::WORKFLOW.iter().rev().copied() {
            if !capabilities.contains(phase) {
                continue;
            }
            if let Err(err) = self.pipeline.add_phase(name, &handle, phase) {
                self.pipeline.retract(name);
                self.modules.retain(|e| e.name != name);
                return Err(LoadError::Pipeline(err));
            }
        }

        info!("module {name} loaded [version {version}]");
        Ok(())
    }

    /// Remove a module and every pipeline step it owns.
    ///
    /// An initialized module is finalized first (best-effort). Returns
    /// whether the module was registered at all.
    pub fn unload(&mut self, name: &str) -> bool {
        let Some(index) = self.modules.iter().position(|e| e.name == name) else {
            return false;
        };
        if self.modules[index].status == ModuleStatus::Initialized {
            let code = self.modules[index].handle.borrow_mut().fini();
            if !code.is_success() {
                warn!("module {name} failed to finalize on unload ({code:?})");
            }
        }
        let retracted = self.pipeline.retract(name);
        self.modules.remove(index);
        debug!("module {name} unloaded ({retracted} steps retracted)");
        true
    }

    /// Append `--<option>` to a module's option list, loading the module
    /// first if it is not registered yet.
    ///
    /// Options are write-before-init: once a module is initialized its
    /// option list is frozen.
    pub fn set_option(&mut self, module: &str, option: &str) -> Result<(), LoadError> {
        if !self.available(module) {
            self.load(module)?;
        }
        let Some(entry) = self.entry_mut(module) else {
            // load() succeeded, so the entry exists; keep the error path
            // anyway instead of unwrapping.
            return Err(LoadError::NotFound(module.to_string()));
        };
        if entry.status != ModuleStatus::Loaded {
            return Err(LoadError::OptionsFrozen(module.to_string()));
        }
        entry.options.push(format!("--{option}"));
        debug!("{module} option set [{option}]");
        Ok(())
    }
}
