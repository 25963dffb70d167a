//! # tunekit - Module Pipeline Orchestrator for Performance Tuning
//!
//! tunekit chains external compilers, profilers and analyzers into a single
//! ordered pipeline. Each tool is wrapped in a *module* that contributes one
//! or more of five workflow phases; the orchestrator owns the pipeline and
//! converges it to an order that satisfies the constraints the modules
//! declare about each other.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ModuleLibrary                           │
//! │   search path of ModuleSource implementations               │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ resolve(name)
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Orchestrator                            │
//! │                                                             │
//! │  ┌──────────┐    ┌─────────────┐    ┌──────────────┐        │
//! │  │  Loader  │───▶│  Pipeline   │◀───│  Dependency  │        │
//! │  │          │    │ (step list) │    │  Resolver    │        │
//! │  └──────────┘    └──────┬──────┘    └──────▲───────┘        │
//! │                         │                  │ requires()     │
//! │                         ▼                  │ from init()    │
//! │                  ┌─────────────┐           │                │
//! │                  │  Execution  │───────────┘                │
//! │                  │   Driver    │                            │
//! │                  └──────┬──────┘                            │
//! └─────────────────────────┼───────────────────────────────────┘
//!                           │ run_phase()
//!                           ▼
//!            external compilers / profilers / analyzers
//! ```
//!
//! ## Module Structure
//!
//! - [`domain`]: closed value sets (phases, orders, result codes) and
//!   structured errors
//! - [`module`]: the [`Module`](module::Module) trait every pluggable unit
//!   implements, with capability queries instead of nullable entry points
//! - [`library`]: pluggable module resolution along an ordered search path
//! - [`pipeline`]: the step list, its placement rule and the
//!   singleton-compiler invariant
//! - [`orchestrator`]: loader, dependency resolver and execution driver
//!   behind one explicit object
//! - [`export`]: JSON run-report writer
//! - [`builtin`]: built-in modules (`make`)
//! - [`cli`]: command-line argument parsing
//!
//! ## Typical Usage
//!
//! ```no_run
//! use tunekit::builtin::default_library;
//! use tunekit::orchestrator::Orchestrator;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut orchestrator = Orchestrator::new(default_library());
//! orchestrator.load("make")?;
//! orchestrator.set_option("make", "target=all")?;
//! orchestrator.init_all()?;
//! let _report = orchestrator.run()?;
//! orchestrator.fini_all();
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Concepts
//!
//! - **Phase**: one of compile, instrument, measure, analyze, recommend
//! - **Step**: one scheduled (module, phase) unit in the pipeline
//! - **Singleton compiler**: at most one compile step may exist at a time
//! - **`requires`**: declarative ordering constraint; lazily moves or
//!   clones steps until the pipeline satisfies every declaration

pub mod builtin;
pub mod cli;
pub mod domain;
pub mod export;
pub mod library;
pub mod module;
pub mod orchestrator;
pub mod pipeline;
