//! The contract every pluggable module implements.
//!
//! A module contributes one or more workflow phases and a small lifecycle
//! surface. Instead of resolving nullable symbols out of a shared object,
//! the orchestrator asks each module which phases it implements via a
//! [`PhaseSet`] capability query and dispatches through [`Module::run_phase`].

use crate::domain::{Phase, PhaseSet, ResultCode};
use crate::orchestrator::InitContext;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a registered module.
///
/// The orchestrator is single-threaded; `Rc<RefCell<..>>` gives steps and
/// the registry shared access without locking.
pub(crate) type SharedModule = Rc<RefCell<Box<dyn Module>>>;

/// A pluggable unit contributing phases to the tuning pipeline.
///
/// `version`, `load`, `init` and `fini` are the required surface; a module
/// that cannot provide them cannot be registered (the compiler enforces what
/// the original symbol lookup checked at runtime). Phase entry points are
/// optional: declare them in [`Module::capabilities`] and serve them from
/// [`Module::run_phase`].
pub trait Module {
    /// Module version string, cached by the loader at registration.
    fn version(&self) -> &str;

    /// Load hook, invoked exactly once when the loader resolves the module.
    /// Returning anything but [`ResultCode::Success`] discards the
    /// registration.
    fn load(&mut self) -> ResultCode;

    /// Init hook. Declare ordering constraints through
    /// [`InitContext::requires`] and read accumulated options through
    /// [`InitContext::options`]. A non-success return aborts the whole run.
    fn init(&mut self, ctx: &mut InitContext<'_>) -> ResultCode;

    /// Teardown hook. Failures are collected, never fatal to other modules.
    fn fini(&mut self) -> ResultCode;

    /// Which phases this module contributes. Snapshotted at registration;
    /// the answer must not change afterwards.
    fn capabilities(&self) -> PhaseSet {
        PhaseSet::EMPTY
    }

    /// Run one phase. Called only with phases declared in
    /// [`Module::capabilities`]; the default answers [`ResultCode::Undefined`]
    /// for anything else.
    fn run_phase(&mut self, phase: Phase) -> ResultCode {
        let _ = phase;
        ResultCode::Undefined
    }
}
