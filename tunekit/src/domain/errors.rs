//! Structured error types for tunekit
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! Each orchestrator concern owns one enum; expected conditions are returned,
//! never panicked.

use super::types::{Order, Phase, ResultCode};
use thiserror::Error;

/// Failures while registering a module.
///
/// Always fatal to that module's registration, never to the process.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no module source provides \"{0}\"")]
    NotFound(String),

    #[error("module {name} refused to load ({code:?})")]
    Rejected { name: String, code: ResultCode },

    #[error("module {0} options are frozen after init")]
    OptionsFrozen(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Structural pipeline violations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("a compile step is already registered (module {existing})")]
    CompilerConflict { existing: String },
}

/// Failures reported by the dependency resolver.
///
/// By convention these are not fatal to the orchestration: the calling
/// module decides in its own `init` whether to abort.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no step matches {}/{phase}", module.as_deref().unwrap_or("*"))]
    PhaseNotAvailable { module: Option<String>, phase: Phase },

    #[error("{order:?} needs a named prerequisite module")]
    OrderNeedsModule { order: Order },

    #[error("{order:?} matches by phase only and takes no module name")]
    OrderForbidsModule { order: Order },
}

/// Failures that abort an orchestration run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("module {name} failed to initialize ({code:?})")]
    InitFailed { name: String, code: ResultCode },

    #[error("module {name} is not initialized")]
    NotInitialized { name: String },

    #[error("step {module}/{phase} failed ({code:?})")]
    StepFailed { module: String, phase: Phase, code: ResultCode },
}

/// One teardown failure collected by `fini_all`.
///
/// Teardown is best-effort: these never abort the remaining modules.
#[derive(Error, Debug)]
#[error("module {name} failed to finalize ({code:?})")]
pub struct FiniError {
    pub name: String,
    pub code: ResultCode,
}

/// Failures while writing a run report.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
