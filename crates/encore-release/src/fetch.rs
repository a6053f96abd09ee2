use std::io;
use std::time::{Duration, SystemTime};

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::github::{self, GITHUB_API_VERSION, GITHUB_MEDIA_TYPE, USER_AGENT};
use crate::{Release, Repository};

/// Overrides the releases endpoint. `-` disables fetching entirely.
pub const RELEASES_URL_ENV: &str = "ENCORE_RELEASES_URL";

// Use GitHub's TTL, but don't re-check more than every 60 seconds.
const MINIMUM_CACHE_TTL: Duration = Duration::from_secs(60);

static PARSE_MAX_AGE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"max-age=(\d+)").unwrap());

#[derive(Serialize, Deserialize, Debug)]
struct CachedReleases {
    expires_at: SystemTime,
    etag: Option<String>,
    releases: Vec<Release>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Failed to fetch releases from {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Fetching releases from {url} failed with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

type Result<T> = std::result::Result<T, Error>;

/// Lists published releases, caching the listing on disk and revalidating it with ETags.
#[derive(Debug, Clone)]
pub struct ReleaseFetcher {
    client: reqwest::Client,
    url: String,
    cache_file: Utf8PathBuf,
}

impl ReleaseFetcher {
    /// A fetcher for `repository`, honoring the `ENCORE_RELEASES_URL` override.
    pub fn new(repository: &Repository, cache_dir: &Utf8Path) -> Self {
        let url = std::env::var(RELEASES_URL_ENV).unwrap_or_else(|_| repository.releases_url());
        let cache_file = cache_dir
            .join("releases")
            .join(repository.cache_file_name());

        Self::with_url(url, cache_file)
    }

    pub fn with_url(url: impl Into<String>, cache_file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            cache_file: cache_file.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Lists releases, falling back to a stale cached listing (or nothing) when the feed
    /// cannot be reached.
    pub async fn discover_releases(&self) -> Vec<Release> {
        match self.fetch_releases().await {
            Ok(releases) => releases,
            Err(e) => {
                warn!("Could not fetch or re-validate the release list: {}", e);
                match self.read_cache() {
                    Some(cached) => {
                        warn!("Using stale list of releases from cache.");
                        cached.releases
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    /// Lists releases, reporting any failure to reach the feed.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_releases(&self) -> Result<Vec<Release>> {
        if self.url == "-" {
            debug!("{RELEASES_URL_ENV} is '-', returning empty list without network request.");
            return Ok(Vec::new());
        }

        // 1. Serve fresh cached data immediately.
        let cached = self.read_cache();
        if let Some(cache) = &cached {
            if SystemTime::now() < cache.expires_at {
                debug!("Using cached list of releases.");
                return Ok(cache.releases.clone());
            }
            debug!("Cached release list is stale, re-validating with server.");
        }

        // 2. Cache is stale or missing.
        let mut request_builder = self
            .client
            .get(&self.url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);

        if let Some(authorization) = github::authorization_for(&self.url) {
            debug!("Using authenticated GitHub API request");
            request_builder = request_builder.header("Authorization", authorization);
        }

        // 3. Use the ETag for a conditional request if we have one.
        if let Some(etag) = cached.as_ref().and_then(|c| c.etag.as_deref()) {
            debug!("Using ETag to make a conditional request: {}", etag);
            request_builder = request_builder.header("If-None-Match", etag);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|source| self.request_error(source))?;
        let max_age = response
            .headers()
            .get("Cache-Control")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(MINIMUM_CACHE_TTL);
        let expires_at = SystemTime::now() + max_age.max(MINIMUM_CACHE_TTL);

        // 4. Handle the server's response.
        match response.status() {
            reqwest::StatusCode::NOT_MODIFIED => {
                debug!("Release list is unchanged (304 Not Modified).");
                let mut stale = cached
                    .ok_or_else(|| io::Error::other("304 response without prior cache"))?;

                stale.expires_at = expires_at;
                self.write_cache_or_warn(&stale);
                Ok(stale.releases)
            }
            reqwest::StatusCode::OK => {
                let etag = response
                    .headers()
                    .get("ETag")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);

                let releases: Vec<Release> = response
                    .json()
                    .await
                    .map_err(|source| self.request_error(source))?;
                debug!("Received {} releases (200 OK).", releases.len());

                let entry = CachedReleases {
                    expires_at,
                    etag,
                    releases,
                };
                self.write_cache_or_warn(&entry);

                Ok(entry.releases)
            }
            status => {
                warn!("Failed to fetch releases, status: {}", status);
                Err(Error::Status {
                    url: self.url.clone(),
                    status,
                })
            }
        }
    }

    fn request_error(&self, source: reqwest::Error) -> Error {
        Error::Request {
            url: self.url.clone(),
            source,
        }
    }

    fn read_cache(&self) -> Option<CachedReleases> {
        let content = fs::read_to_string(&self.cache_file).ok()?;
        match serde_json::from_str(&content) {
            Ok(cached) => Some(cached),
            Err(err) => {
                debug!("Ignoring unreadable release cache {}: {}", self.cache_file, err);
                None
            }
        }
    }

    // A listing that cannot be cached is still served.
    fn write_cache_or_warn(&self, entry: &CachedReleases) {
        if let Err(err) = self.write_cache(entry) {
            warn!("Could not write release cache {}: {}", self.cache_file, err);
        }
    }

    fn write_cache(&self, entry: &CachedReleases) -> Result<()> {
        if let Some(parent) = self.cache_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.cache_file, serde_json::to_string(entry)?)?;
        Ok(())
    }
}

/// Parses the `max-age` value from a `Cache-Control` header.
fn parse_max_age(header: &str) -> Option<Duration> {
    PARSE_MAX_AGE_REGEX
        .captures(header)
        .and_then(|caps| caps.get(1))
        .and_then(|age| age.as_str().parse::<u64>().ok())
        .map(Duration::from_secs)
}
