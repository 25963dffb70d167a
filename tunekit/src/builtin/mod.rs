//! Built-in modules.
//!
//! Real deployments add their own profiler/analyzer modules through
//! [`ModuleSource`](crate::library::ModuleSource); the built-ins cover the
//! common entry point of a tuning session: building the target program.

pub mod make;

pub use make::MakeModule;

use crate::library::{ModuleLibrary, StaticSource};

/// A library preloaded with every built-in module.
#[must_use]
pub fn default_library() -> ModuleLibrary {
    let mut source = StaticSource::new();
    source.register("make", || Box::new(MakeModule::new()));
    let mut library = ModuleLibrary::new();
    library.push_source(Box::new(source));
    library
}
