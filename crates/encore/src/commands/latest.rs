use anstream::println;
use clap::Args;
use encore_release::tags::{TAG_PREFIX, latest_tag};
use serde::Serialize;

use crate::commands::OutputFormat;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error("None of the {count} tags start with `v`")]
    #[diagnostic(help("Release tags look like `v1.2.0`"))]
    NoEligibleTag { count: usize },
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Args)]
pub struct LatestArgs {
    /// Release tags, e.g. `v1.2.0`
    #[arg(required = true)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct LatestOutput<'a> {
    tag: String,
    version: &'a str,
}

pub(crate) fn latest(args: LatestArgs) -> Result<()> {
    let version = latest_tag(args.tags.iter().map(String::as_str)).ok_or(
        Error::NoEligibleTag {
            count: args.tags.len(),
        },
    )?;

    match args.format {
        OutputFormat::Json => {
            let output = LatestOutput {
                tag: format!("{TAG_PREFIX}{version}"),
                version,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => println!("{version}"),
    }

    Ok(())
}
