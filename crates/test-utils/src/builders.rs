#![allow(dead_code)]

use std::collections::HashMap;

use flowdag::{Registry, StageId};

/// Builder registering named stages to simplify test setup.
///
/// The stage name doubles as the work payload, so tests can look stages up by
/// name afterwards through the returned id map.
pub struct RegistryBuilder {
    specs: Vec<(String, Vec<String>, Vec<String>)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    pub fn stage(mut self, name: &str, inputs: &[&str], outputs: &[&str]) -> Self {
        self.specs.push((
            name.to_string(),
            inputs.iter().map(|s| s.to_string()).collect(),
            outputs.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn build(self) -> (Registry<String>, HashMap<String, StageId>) {
        let mut registry = Registry::new();
        let mut ids = HashMap::new();

        for (name, inputs, outputs) in self.specs {
            let id = registry
                .register(inputs, outputs, name.clone())
                .expect("builder stages must form an acyclic graph");
            ids.insert(name, id);
        }

        (registry, ids)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
