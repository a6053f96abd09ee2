use anstream::println;
use clap::Args;
use encore_prefs::Preferences;
use encore_prefs::key::{
    CHECK_FOR_UPDATES, INCLUDE_PRERELEASES, LAST_SEEN_VERSION, UPDATE_REPOSITORY,
};
use encore_release::repository::InvalidRepository;
use encore_release::{Release, ReleaseFetcher, Repository, UpdateStatus, check_for_update};
use owo_colors::OwoColorize;
use tracing::{debug, info, warn};

use crate::GlobalArgs;
use crate::commands::OutputFormat;
use crate::config::Config;

/// Version of this build, used when `--current` is not given.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigError(#[from] crate::config::Error),
    #[error("The update_repository preference is invalid")]
    #[diagnostic(help("Run `encore prefs set update_repository OWNER/NAME`"))]
    InvalidRepositoryPreference(#[source] InvalidRepository),
    #[error(transparent)]
    PrefsError(#[from] encore_prefs::Error),
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Args)]
pub struct CheckArgs {
    /// Version to compare releases against. Defaults to the version of this build.
    #[arg(long, value_name = "VERSION")]
    pub current: Option<String>,

    /// Repository publishing releases, as OWNER/NAME
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<Repository>,

    /// Check even when update checks are turned off in preferences
    #[arg(long)]
    pub force: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub(crate) async fn check(global_args: &GlobalArgs, args: CheckArgs) -> Result<()> {
    let config = Config::new(global_args)?;
    let mut prefs = config.preferences()?;

    if !args.force && !prefs.get(&CHECK_FOR_UPDATES) {
        println!(
            "Update checks are turned off. Run `encore prefs set {} true` or pass --force.",
            CHECK_FOR_UPDATES.name
        );
        return Ok(());
    }

    let repository = match args.repo {
        Some(repo) => repo,
        None => prefs
            .get(&UPDATE_REPOSITORY)
            .parse()
            .map_err(Error::InvalidRepositoryPreference)?,
    };
    let current = args.current.as_deref().unwrap_or(CURRENT_VERSION);

    let fetcher = ReleaseFetcher::new(&repository, config.cache_dir());
    debug!("Checking {} for releases newer than {}", fetcher.url(), current);

    let releases = fetcher.discover_releases().await;
    if releases.is_empty() {
        warn!("No releases found for {repository}.");
    }

    let include_prereleases = prefs.get(&INCLUDE_PRERELEASES);
    let eligible = releases
        .iter()
        .filter(|release| include_prereleases || !release.prerelease);
    let status = check_for_update(current, eligible);

    if let Some(latest) = status.latest() {
        prefs.set(&LAST_SEEN_VERSION, &Some(latest.to_string()))?;
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Text => print_status(&status),
    }

    Ok(())
}

fn print_status(status: &UpdateStatus) {
    match status {
        UpdateStatus::Available {
            current,
            latest,
            release,
        } => {
            println!(
                "Update available: {} -> {}",
                current.yellow(),
                latest.green()
            );
            if let Some(line) = release_line(release) {
                println!("{line}");
            }
        }
        UpdateStatus::UpToDate {
            current,
            latest: Some(latest),
        } => {
            println!("{} is up to date (latest release: {latest})", current.cyan());
        }
        UpdateStatus::UpToDate {
            current,
            latest: None,
        } => {
            println!("{} is up to date", current.cyan());
            info!("No release tagged v<version> was published.");
        }
    }
}

fn release_line(release: &Release) -> Option<String> {
    let url = release.html_url.as_deref()?;
    Some(match release.name.as_deref() {
        Some(name) => format!("{name}: {url}"),
        None => url.to_owned(),
    })
}
