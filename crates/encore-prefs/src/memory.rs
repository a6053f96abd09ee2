use std::collections::BTreeMap;

use serde_json::Value;

use crate::{PreferenceStore, Result};

/// Preferences held only for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

impl PreferenceStore for MemoryStore {
    fn get_raw(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn set_raw(&mut self, name: &str, value: Value) -> Result<()> {
        self.values.insert(name.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        self.values.remove(name);
        Ok(())
    }

    fn entries(&self) -> BTreeMap<String, Value> {
        self.values.clone()
    }
}
