use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile_ext::camino_tempfile::Utf8TempDir;
use std::{collections::HashMap, process::Command};

pub struct EncoreTest {
    pub temp_dir: Utf8TempDir,
    pub env: HashMap<String, String>,
}

impl EncoreTest {
    pub fn new() -> Self {
        let temp_dir = Utf8TempDir::new().expect("Failed to create temporary directory");

        let mut test = Self {
            temp_dir,
            env: HashMap::new(),
        };

        let home = test.temp_root().join("home");
        let cache = test.cache_dir();
        let config = test.config_dir();
        test.env.insert("HOME".into(), home.into());
        test.env.insert("ENCORE_CACHE_DIR".into(), cache.into());
        test.env.insert("ENCORE_CONFIG_DIR".into(), config.into());
        // Never reach the real GitHub API from tests.
        test.env.insert("ENCORE_RELEASES_URL".into(), "-".into());

        test
    }

    pub fn temp_root(&self) -> &Utf8Path {
        self.temp_dir.path()
    }

    pub fn cache_dir(&self) -> Utf8PathBuf {
        self.temp_root().join("cache")
    }

    pub fn config_dir(&self) -> Utf8PathBuf {
        self.temp_root().join("config")
    }

    pub fn preferences_file(&self) -> Utf8PathBuf {
        self.config_dir().join("preferences.json")
    }

    /// Point release fetching at a mock server.
    pub fn use_releases_url(&mut self, url: String) {
        self.env.insert("ENCORE_RELEASES_URL".into(), url);
    }

    pub fn encore(&self, args: &[&str]) -> EncoreOutput {
        let mut cmd = self.encore_command();
        cmd.args(args);

        let output = cmd.output().expect("Failed to execute encore command");
        EncoreOutput { output }
    }

    pub fn encore_command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_encore"));
        cmd.current_dir(self.temp_root());
        cmd.env_clear().envs(&self.env);
        cmd
    }
}

pub struct EncoreOutput {
    pub output: std::process::Output,
}

impl EncoreOutput {
    pub fn success(&self) -> bool {
        self.output.status.success()
    }

    #[track_caller]
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success(),
            "Expected command to succeed, got {:#?}",
            self.output
        );
        self
    }

    #[track_caller]
    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.success(),
            "Expected command to fail, got {:#?}",
            self.output
        );
        self
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }
}
