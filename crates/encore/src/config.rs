use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use encore_prefs::JsonFileStore;
use miette::Diagnostic;
use tracing::debug;

use crate::GlobalArgs;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    #[error("Could not create a temporary cache directory")]
    TempCache(#[source] std::io::Error),
    #[error("Could not load preferences")]
    #[diagnostic(help("Fix or delete the preferences file at {path}"))]
    Preferences {
        path: Utf8PathBuf,
        #[source]
        source: encore_prefs::Error,
    },
}

/// Locations resolved from global arguments, environment and platform defaults.
#[derive(Debug)]
pub struct Config {
    pub cache_dir: Utf8PathBuf,
    pub config_dir: Utf8PathBuf,
    // Removed when the config is dropped.
    _temp_cache: Option<Utf8TempDir>,
}

impl Config {
    /// Resolves directories, preferring in order:
    ///
    /// 1. A temporary cache directory, if the user requested `--no-cache`.
    /// 2. Directories given via `--cache-dir`/`--config-dir` or their environment variables.
    /// 3. The system-appropriate directories.
    pub fn new(global_args: &GlobalArgs) -> Result<Self, Error> {
        let (cache_dir, temp_cache) = if global_args.no_cache {
            let temp = Utf8TempDir::new().map_err(Error::TempCache)?;
            (temp.path().to_path_buf(), Some(temp))
        } else {
            let dir = global_args
                .cache_dir
                .clone()
                .unwrap_or_else(encore_dirs::user_cache_dir);
            (dir, None)
        };

        let config_dir = global_args
            .config_dir
            .clone()
            .unwrap_or_else(encore_dirs::user_config_dir);

        debug!("Using cache dir {cache_dir} and config dir {config_dir}");

        Ok(Self {
            cache_dir,
            config_dir,
            _temp_cache: temp_cache,
        })
    }

    pub fn preferences_path(&self) -> Utf8PathBuf {
        encore_dirs::preferences_file(&self.config_dir)
    }

    pub fn preferences(&self) -> Result<JsonFileStore, Error> {
        let path = self.preferences_path();
        JsonFileStore::open(&path).map_err(|source| Error::Preferences { path, source })
    }

    pub fn cache_dir(&self) -> &Utf8Path {
        &self.cache_dir
    }
}
