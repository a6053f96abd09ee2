use std::str::FromStr;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Error, Result};

/// Name of a preference together with the value it has when nothing is stored.
pub struct PrefKey<T> {
    pub name: &'static str,
    default: fn() -> T,
}

impl<T> PrefKey<T> {
    pub const fn new(name: &'static str, default: fn() -> T) -> Self {
        Self { name, default }
    }

    pub fn default_value(&self) -> T {
        (self.default)()
    }
}

impl<T> std::fmt::Debug for PrefKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrefKey").field(&self.name).finish()
    }
}

/// Whether the player looks for new releases at all.
pub const CHECK_FOR_UPDATES: PrefKey<bool> = PrefKey::new("check_for_updates", || true);

/// Whether releases GitHub marks as pre-releases count as updates.
pub const INCLUDE_PRERELEASES: PrefKey<bool> = PrefKey::new("include_prereleases", || true);

/// `owner/name` of the GitHub repository publishing releases.
pub const UPDATE_REPOSITORY: PrefKey<String> =
    PrefKey::new("update_repository", || "encore-player/encore".to_owned());

/// Highest release version seen by the last successful check.
pub const LAST_SEEN_VERSION: PrefKey<Option<String>> = PrefKey::new("last_seen_version", || None);

/// The built-in preferences, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownKey {
    CheckForUpdates,
    IncludePrereleases,
    UpdateRepository,
    LastSeenVersion,
}

impl KnownKey {
    pub const ALL: [KnownKey; 4] = [
        KnownKey::CheckForUpdates,
        KnownKey::IncludePrereleases,
        KnownKey::UpdateRepository,
        KnownKey::LastSeenVersion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KnownKey::CheckForUpdates => CHECK_FOR_UPDATES.name,
            KnownKey::IncludePrereleases => INCLUDE_PRERELEASES.name,
            KnownKey::UpdateRepository => UPDATE_REPOSITORY.name,
            KnownKey::LastSeenVersion => LAST_SEEN_VERSION.name,
        }
    }

    pub fn default_value(self) -> Value {
        match self {
            KnownKey::CheckForUpdates => to_value(CHECK_FOR_UPDATES.default_value()),
            KnownKey::IncludePrereleases => to_value(INCLUDE_PRERELEASES.default_value()),
            KnownKey::UpdateRepository => to_value(UPDATE_REPOSITORY.default_value()),
            KnownKey::LastSeenVersion => to_value(LAST_SEEN_VERSION.default_value()),
        }
    }

    /// Converts command-line text into the JSON value stored for this key.
    ///
    /// Booleans accept `true`/`false`/`yes`/`no`/`on`/`off`/`1`/`0`. For optional values the
    /// empty string clears the value.
    pub fn parse_value(self, raw: &str) -> Result<Value> {
        match self {
            KnownKey::CheckForUpdates | KnownKey::IncludePrereleases => {
                match raw.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
                    "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
                    _ => Err(self.invalid(raw.to_owned())),
                }
            }
            KnownKey::UpdateRepository => match raw.trim() {
                "" => Err(self.invalid(raw.to_owned())),
                repo => Ok(Value::String(repo.to_owned())),
            },
            KnownKey::LastSeenVersion => match raw.trim() {
                "" => Ok(Value::Null),
                version => Ok(Value::String(version.to_owned())),
            },
        }
    }

    /// Checks a stored value the way typed reads decode it.
    ///
    /// Typed reads silently fall back to the default for a value that fails here, so callers
    /// showing stored values should report the error instead.
    pub fn decode(self, raw: Value) -> Result<Value> {
        let shown = match &raw {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let decoded = match self {
            KnownKey::CheckForUpdates => decode_as(&CHECK_FOR_UPDATES, raw),
            KnownKey::IncludePrereleases => decode_as(&INCLUDE_PRERELEASES, raw),
            KnownKey::UpdateRepository => decode_as(&UPDATE_REPOSITORY, raw),
            KnownKey::LastSeenVersion => decode_as(&LAST_SEEN_VERSION, raw),
        };
        decoded.ok_or_else(|| self.invalid(shown))
    }

    fn expected(self) -> &'static str {
        match self {
            KnownKey::CheckForUpdates | KnownKey::IncludePrereleases => "a boolean",
            KnownKey::UpdateRepository => "a repository name",
            KnownKey::LastSeenVersion => "a version or nothing",
        }
    }

    fn invalid(self, value: String) -> Error {
        Error::InvalidValue {
            key: self.name(),
            value,
            expected: self.expected(),
        }
    }
}

fn decode_as<T: Serialize + DeserializeOwned>(_key: &PrefKey<T>, raw: Value) -> Option<Value> {
    serde_json::from_value::<T>(raw).ok().map(to_value)
}

fn to_value(value: impl Serialize) -> Value {
    // Only plain booleans, strings and options go through here.
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl FromStr for KnownKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        KnownKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| Error::UnknownKey(s.to_owned()))
    }
}

impl std::fmt::Display for KnownKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
