//! Lenient dot-separated version numbers.
//!
//! Release tags come from a loosely controlled feed, so parsing never fails: every segment
//! that is not a plain non-negative integer counts as `0`, and missing trailing segments are
//! `0` as well. Comparison is numeric per segment, so `1.10.0` is newer than `1.9.0`.

use std::cmp::Ordering;
use std::convert::Infallible;

use serde_with::{DeserializeFromStr, SerializeDisplay};

pub type VersionSegment = u64;

/// Outcome of comparing a candidate version against a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Newer,
    SameOrOlder,
}

impl Comparison {
    pub fn is_newer(self) -> bool {
        matches!(self, Self::Newer)
    }
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Self::Newer,
            Ordering::Equal | Ordering::Less => Self::SameOrOlder,
        }
    }
}

/// Returns `true` when `candidate` is strictly newer than `baseline`.
///
/// Both arguments are plain dot-separated versions; any `v` prefix must be stripped by the
/// caller. Equal versions (including `1.2` against `1.2.0`) are not newer.
pub fn is_newer_version(candidate: &str, baseline: &str) -> bool {
    compare_versions(candidate, baseline).is_newer()
}

/// Compares two version strings segment by segment without building [`Version`] values.
pub fn compare_versions(candidate: &str, baseline: &str) -> Comparison {
    cmp_segments(segments(candidate), segments(baseline)).into()
}

fn segments(version: &str) -> impl Iterator<Item = VersionSegment> + '_ {
    (!version.is_empty())
        .then(|| version.split('.'))
        .into_iter()
        .flatten()
        .map(parse_segment)
}

fn parse_segment(segment: &str) -> VersionSegment {
    segment.parse().unwrap_or(0)
}

fn cmp_segments(
    mut left: impl Iterator<Item = VersionSegment>,
    mut right: impl Iterator<Item = VersionSegment>,
) -> Ordering {
    loop {
        let (a, b) = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (a, b) => (a.unwrap_or(0), b.unwrap_or(0)),
        };

        match a.cmp(&b) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
}

/// A parsed version. Keeps the text it was parsed from for display.
#[derive(Debug, Clone, Default, DeserializeFromStr, SerializeDisplay)]
pub struct Version {
    pub version: String,
    pub segments: Vec<VersionSegment>,
}

impl Version {
    pub fn new(version: impl AsRef<str>) -> Self {
        let version = version.as_ref();
        Self {
            version: version.to_owned(),
            segments: segments(version).collect(),
        }
    }

    /// The segment at `index`, or `0` past the end.
    pub fn segment(&self, index: usize) -> VersionSegment {
        self.segments.get(index).copied().unwrap_or(0)
    }

    pub fn major(&self) -> VersionSegment {
        self.segment(0)
    }

    pub fn minor(&self) -> VersionSegment {
        self.segment(1)
    }

    pub fn patch(&self) -> VersionSegment {
        self.segment(2)
    }

    /// Segments with trailing zeros removed, so `1.2` and `1.2.0` are identical.
    pub fn canonical_segments(&self) -> &[VersionSegment] {
        let len = self
            .segments
            .iter()
            .rposition(|s| *s != 0)
            .map_or(0, |i| i + 1);
        &self.segments[..len]
    }

    pub fn compare(&self, baseline: &Version) -> Comparison {
        self.cmp(baseline).into()
    }

    pub fn is_newer_than(&self, baseline: &Version) -> bool {
        self.compare(baseline).is_newer()
    }
}

/// A missing version is treated as the empty, all-zero version.
impl From<Option<&str>> for Version {
    fn from(version: Option<&str>) -> Self {
        Self::new(version.unwrap_or_default())
    }
}

impl From<&str> for Version {
    fn from(version: &str) -> Self {
        Self::new(version)
    }
}

impl std::str::FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.version)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_segments() == other.canonical_segments()
    }
}

impl Eq for Version {}

impl std::hash::Hash for Version {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical_segments().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_segments(
            self.segments.iter().copied(),
            other.segments.iter().copied(),
        )
    }
}
