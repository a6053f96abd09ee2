use std::ffi::OsString;

use camino::{Utf8Path, Utf8PathBuf};
use etcetera::BaseStrategy;
use tracing::debug;

const APP_NAME: &str = "encore";

/// File name of the preferences store inside the config directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Returns an appropriate user-level directory for storing the cache.
///
/// This follows, in order:
///
/// - `$ENCORE_CACHE_DIR` (if set to an absolute path)
/// - `$XDG_CACHE_HOME/encore` on Unix, the platform cache directory elsewhere
/// - `<temp>/encore/cache` if no home directory can be resolved
pub fn user_cache_dir() -> Utf8PathBuf {
    dir_from_env("ENCORE_CACHE_DIR").unwrap_or_else(|| {
        base_dir(BaseDir::Cache).unwrap_or_else(|| temp_dir().join("cache"))
    })
}

/// Returns the directory holding user configuration, including the preferences file.
///
/// On Windows, use, e.g., C:\Users\Alice\AppData\Roaming\encore
/// On Linux and macOS, use `XDG_CONFIG_HOME` or $HOME/.config, e.g., /home/alice/.config/encore.
///
/// `$ENCORE_CONFIG_DIR` overrides both when set to an absolute path, and `<temp>/encore/config`
/// is used if no home directory can be resolved.
pub fn user_config_dir() -> Utf8PathBuf {
    dir_from_env("ENCORE_CONFIG_DIR").unwrap_or_else(|| {
        base_dir(BaseDir::Config).unwrap_or_else(|| temp_dir().join("config"))
    })
}

/// Path of the preferences file inside `config_dir`.
pub fn preferences_file(config_dir: &Utf8Path) -> Utf8PathBuf {
    config_dir.join(PREFERENCES_FILE)
}

#[derive(Clone, Copy)]
enum BaseDir {
    Cache,
    Config,
}

fn base_dir(kind: BaseDir) -> Option<Utf8PathBuf> {
    let dirs = match etcetera::choose_base_strategy() {
        Ok(dirs) => dirs,
        Err(err) => {
            debug!("Could not determine base directories: {err}");
            return None;
        }
    };

    let dir = match kind {
        BaseDir::Cache => dirs.cache_dir(),
        BaseDir::Config => dirs.config_dir(),
    };
    Utf8PathBuf::try_from(dir.join(APP_NAME)).ok()
}

fn temp_dir() -> Utf8PathBuf {
    let dir = std::env::temp_dir().join(APP_NAME);
    Utf8PathBuf::try_from(dir).unwrap_or_else(|_| Utf8PathBuf::from(APP_NAME))
}

fn dir_from_env(variable: &str) -> Option<Utf8PathBuf> {
    std::env::var_os(variable).and_then(parse_path)
}

/// Return a [`Utf8PathBuf`] if the given [`OsString`] is an absolute UTF-8 path.
fn parse_path(path: OsString) -> Option<Utf8PathBuf> {
    let path = Utf8PathBuf::from(path.into_string().ok()?);
    if path.is_absolute() { Some(path) } else { None }
}
