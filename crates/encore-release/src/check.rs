use encore_version::{Version, is_newer_version};
use serde::Serialize;
use tracing::debug;

use crate::Release;
use crate::tags::latest_release;

/// Result of comparing the published releases against the running version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateStatus {
    UpToDate {
        current: Version,
        /// Highest published version, when any release is tagged `v<version>`.
        latest: Option<Version>,
    },
    Available {
        current: Version,
        latest: Version,
        release: Release,
    },
}

impl UpdateStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    pub fn current(&self) -> &Version {
        match self {
            Self::UpToDate { current, .. } | Self::Available { current, .. } => current,
        }
    }

    pub fn latest(&self) -> Option<&Version> {
        match self {
            Self::UpToDate { latest, .. } => latest.as_ref(),
            Self::Available { latest, .. } => Some(latest),
        }
    }
}

/// Decides whether any of `releases` is newer than `current`.
pub fn check_for_update<'a>(
    current: &str,
    releases: impl IntoIterator<Item = &'a Release>,
) -> UpdateStatus {
    let latest = latest_release(releases);

    match latest {
        Some((release, latest)) if is_newer_version(latest, current) => {
            debug!("Release {} is newer than {}", release.tag_name, current);
            UpdateStatus::Available {
                current: Version::new(current),
                latest: Version::new(latest),
                release: release.clone(),
            }
        }
        latest => {
            debug!(
                "No release newer than {} (latest: {:?})",
                current,
                latest.map(|(release, _)| &release.tag_name)
            );
            UpdateStatus::UpToDate {
                current: Version::new(current),
                latest: latest.map(|(_, version)| Version::new(version)),
            }
        }
    }
}
