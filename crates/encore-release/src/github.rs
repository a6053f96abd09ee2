//! GitHub API conventions shared by release fetching.

/// The GitHub API version requested on every call.
/// See: https://docs.github.com/en/rest/overview/api-versions
pub const GITHUB_API_VERSION: &str = "2022-11-28";

pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

pub const USER_AGENT: &str = "encore-cli";

/// Retrieves a GitHub token from `GITHUB_TOKEN`, then `GH_TOKEN`.
pub fn github_token() -> Option<String> {
    token_from(|name| std::env::var(name).ok())
}

fn token_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["GITHUB_TOKEN", "GH_TOKEN"]
        .into_iter()
        .filter_map(lookup)
        .find(|token| !token.trim().is_empty())
}

/// Checks if the URL points at github.com or one of its subdomains.
pub fn is_github_url(url: &str) -> bool {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .is_some_and(|host| host == "github.com" || host.ends_with(".github.com"))
}

/// The bearer token to send to `url`. Tokens are only ever sent to GitHub hosts, so a
/// releases URL override cannot collect them.
pub fn authorization_for(url: &str) -> Option<String> {
    if !is_github_url(url) {
        return None;
    }
    github_token().map(|token| format!("Bearer {token}"))
}
