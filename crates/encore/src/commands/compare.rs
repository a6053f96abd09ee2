use anstream::println;
use clap::Args;
use encore_version::is_newer_version;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::commands::OutputFormat;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Args)]
pub struct CompareArgs {
    /// Version being tested, without any `v` prefix
    #[arg(allow_hyphen_values = true)]
    pub candidate: String,

    /// Version to compare against, without any `v` prefix
    #[arg(allow_hyphen_values = true)]
    pub baseline: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    candidate: &'a str,
    baseline: &'a str,
    newer: bool,
}

pub(crate) fn compare(args: CompareArgs) -> Result<()> {
    let newer = is_newer_version(&args.candidate, &args.baseline);

    match args.format {
        OutputFormat::Json => {
            let output = CompareOutput {
                candidate: &args.candidate,
                baseline: &args.baseline,
                newer,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text if newer => println!("{}", "newer".green()),
        OutputFormat::Text => println!("{}", "not newer".yellow()),
    }

    Ok(())
}
