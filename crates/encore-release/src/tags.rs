//! Picking the newest release out of a list of tags.
//!
//! Only tags of the form `v<version>` are eligible. Among eligible tags the highest version
//! wins; when several tags parse to the same version, the first one encountered is kept.

use encore_version::is_newer_version;

use crate::Release;

pub const TAG_PREFIX: char = 'v';

/// Returns the version part of a `v`-prefixed tag, or `None` for any other tag.
pub fn strip_tag_prefix(tag: &str) -> Option<&str> {
    tag.strip_prefix(TAG_PREFIX)
}

/// The highest of already-stripped version strings.
pub fn highest_version<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    first_highest(candidates, |candidate| *candidate)
}

/// The highest version among `v`-prefixed tags, returned without its prefix.
pub fn latest_tag<'a>(tags: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    highest_version(tags.into_iter().filter_map(strip_tag_prefix))
}

/// The release carrying the highest `v`-prefixed tag, along with its stripped version.
pub fn latest_release<'a>(
    releases: impl IntoIterator<Item = &'a Release>,
) -> Option<(&'a Release, &'a str)> {
    let eligible = releases
        .into_iter()
        .filter_map(|release| strip_tag_prefix(&release.tag_name).map(|v| (release, v)));

    first_highest(eligible, |(_, version)| *version)
}

fn first_highest<T>(items: impl IntoIterator<Item = T>, version: impl Fn(&T) -> &str) -> Option<T> {
    let mut highest: Option<T> = None;

    for item in items {
        let replace = highest
            .as_ref()
            .is_none_or(|current| is_newer_version(version(&item), version(current)));

        if replace {
            highest = Some(item);
        }
    }

    highest
}
