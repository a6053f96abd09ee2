use std::collections::BTreeMap;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde_json::Value;
use tracing::debug;

use crate::{Error, PreferenceStore, Result};

/// Preferences persisted as a single JSON object.
///
/// Every write replaces the whole file through a temporary file in the same directory, so
/// readers only ever see a complete document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Loads the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.is_file() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|source| Error::Malformed {
                path: path.to_string(),
                source,
            })?
        } else {
            debug!("No preferences file at {path}, starting empty");
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, Value>) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .unwrap_or(Utf8Path::new("."));
        fs::create_dir_all(dir)?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        let content =
            serde_json::to_string_pretty(values).map_err(std::io::Error::other)?;
        file.write_all(content.as_bytes())?;
        file.write_all(b"\n")?;
        file.persist(&self.path).map_err(|err| err.error)?;

        debug!("Wrote {} preferences to {}", values.len(), self.path);
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get_raw(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn set_raw(&mut self, name: &str, value: Value) -> Result<()> {
        let mut values = self.values.clone();
        values.insert(name.to_owned(), value);
        self.persist(&values)?;
        self.values = values;
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        let mut values = self.values.clone();
        if values.remove(name).is_some() {
            self.persist(&values)?;
            self.values = values;
        }
        Ok(())
    }

    fn entries(&self) -> BTreeMap<String, Value> {
        self.values.clone()
    }
}
