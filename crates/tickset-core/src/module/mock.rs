//! Mock module registry for tests.

use std::collections::HashMap;

use super::{ModuleInfo, ModuleRegistry};

#[derive(Debug, Default)]
pub struct MockRegistry {
    modules: HashMap<String, ModuleInfo>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(name: &str, info: ModuleInfo) -> Self {
        let mut registry = Self::new();
        registry.insert(name, info);
        registry
    }

    pub fn insert(&mut self, name: &str, info: ModuleInfo) {
        self.modules.insert(name.to_string(), info);
    }
}

impl ModuleRegistry for MockRegistry {
    fn locate(&self, name: &str) -> Option<ModuleInfo> {
        self.modules.get(name).copied()
    }
}
