use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

static REPOSITORY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<owner>[A-Za-z0-9_.-]+)/(?P<name>[A-Za-z0-9_.-]+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid repository {0:?}, expected OWNER/NAME")]
pub struct InvalidRepository(pub String);

/// A GitHub repository, written `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// The releases listing endpoint for this repository.
    pub fn releases_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/releases?per_page=100",
            self.owner, self.name
        )
    }

    /// File name used to cache this repository's releases.
    pub fn cache_file_name(&self) -> String {
        format!("{}-{}.json", self.owner, self.name)
    }
}

impl FromStr for Repository {
    type Err = InvalidRepository;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = REPOSITORY_REGEX
            .captures(s.trim())
            .ok_or_else(|| InvalidRepository(s.to_owned()))?;

        Ok(Self {
            owner: caps["owner"].to_owned(),
            name: caps["name"].to_owned(),
        })
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
