//! Release feed handling: which published releases exist, which one is the newest, and
//! whether it is newer than the running build.

use serde::{Deserialize, Serialize};

pub mod check;
pub mod fetch;
pub mod github;
pub mod repository;
pub mod tags;

pub use check::{UpdateStatus, check_for_update};
pub use fetch::ReleaseFetcher;
pub use repository::Repository;

/// A published release, as listed by the GitHub releases API.
///
/// Only `tag_name` takes part in version selection; the rest is carried along for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Release {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            name: None,
            html_url: None,
            draft: false,
            prerelease: false,
            published_at: None,
        }
    }
}
