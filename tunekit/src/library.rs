//! Module artifact resolution.
//!
//! Mirrors dynamic-library search-path semantics without real dynamic
//! loading: a [`ModuleLibrary`] consults its sources in order and the first
//! source that knows a name wins. [`StaticSource`] is the in-process
//! registry-map implementation; embedders with other packaging schemes
//! implement [`ModuleSource`] themselves.

use crate::module::Module;
use std::collections::HashMap;

/// Resolves a module name to a fresh module instance.
pub trait ModuleSource {
    /// Instantiate the module published under `name`, if this source has it.
    fn resolve(&self, name: &str) -> Option<Box<dyn Module>>;
}

/// Ordered search path of module sources.
#[derive(Default)]
pub struct ModuleLibrary {
    sources: Vec<Box<dyn ModuleSource>>,
}

impl ModuleLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source to the end of the search path.
    pub fn push_source(&mut self, source: Box<dyn ModuleSource>) {
        self.sources.push(source);
    }

    /// First-hit resolution along the search path.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Box<dyn Module>> {
        self.sources.iter().find_map(|s| s.resolve(name))
    }
}

type ModuleFactory = Box<dyn Fn() -> Box<dyn Module>>;

/// In-process registry map from module name to constructor.
#[derive(Default)]
pub struct StaticSource {
    factories: HashMap<String, ModuleFactory>,
}

impl StaticSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `name`; later registrations of the same name replace earlier
    /// ones within this source.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Module> + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }
}

impl ModuleSource for StaticSource {
    fn resolve(&self, name: &str) -> Option<Box<dyn Module>> {
        self.factories.get(name).map(|f| f())
    }
}
