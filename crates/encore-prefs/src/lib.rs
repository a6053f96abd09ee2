//! Typed access to persisted key-value preferences.
//!
//! A [`PreferenceStore`] moves raw JSON values in and out of some backend. The
//! [`Preferences`] extension trait layers typed `get`/`set` on top of any store using
//! [`PrefKey`]s, which carry their own defaults so a missing value is never an error.

use std::collections::BTreeMap;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

mod file;
pub mod key;
mod memory;

pub use file::JsonFileStore;
pub use key::{KnownKey, PrefKey};
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Preferences file {path} is not a JSON object")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not encode preference {key}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unknown preference {0}")]
    UnknownKey(String),
    #[error("Invalid value {value:?} for preference {key}, expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Raw storage for preference values.
pub trait PreferenceStore {
    fn get_raw(&self, name: &str) -> Option<Value>;

    fn set_raw(&mut self, name: &str, value: Value) -> Result<()>;

    fn remove(&mut self, name: &str) -> Result<()>;

    /// Every stored value, ordered by name.
    fn entries(&self) -> BTreeMap<String, Value>;
}

/// Typed access over any [`PreferenceStore`].
pub trait Preferences: PreferenceStore {
    /// Reads the value for `key`, falling back to its default when the value is absent or
    /// cannot be decoded as `T`.
    fn get<T: DeserializeOwned>(&self, key: &PrefKey<T>) -> T {
        let Some(raw) = self.get_raw(key.name) else {
            return key.default_value();
        };

        match serde_json::from_value(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "Ignoring stored value for preference {}: {}",
                    key.name, err
                );
                key.default_value()
            }
        }
    }

    fn set<T: Serialize>(&mut self, key: &PrefKey<T>, value: &T) -> Result<()> {
        let raw = serde_json::to_value(value).map_err(|source| Error::Encode {
            key: key.name.to_owned(),
            source,
        })?;
        self.set_raw(key.name, raw)
    }

    /// Forgets the stored value so the default applies again.
    fn reset<T>(&mut self, key: &PrefKey<T>) -> Result<()> {
        self.remove(key.name)
    }
}

impl<S: PreferenceStore + ?Sized> Preferences for S {}
