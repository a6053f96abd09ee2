use std::io::IsTerminal;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod config;

use commands::check::CheckArgs;
use commands::compare::CompareArgs;
use commands::latest::LatestArgs;
use commands::prefs::PrefsArgs;

#[derive(Parser)]
#[command(name = "encore", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global_args: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    /// Avoid reading from or writing to the cache, instead using a temporary directory for the
    /// duration of the operation.
    #[arg(
        global = true,
        long,
        value_parser = clap::builder::BoolishValueParser::new(),
        env = "ENCORE_NO_CACHE"
    )]
    pub no_cache: bool,

    /// Path to the cache directory.
    #[arg(global = true, long, env = "ENCORE_CACHE_DIR")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Path to the directory holding preferences.
    #[arg(global = true, long, env = "ENCORE_CONFIG_DIR")]
    pub config_dir: Option<Utf8PathBuf>,

    /// When to use colors in output
    #[arg(global = true, long, value_enum, default_value = "auto")]
    pub color: clap::ColorChoice,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Check whether one version is newer than another")]
    Compare(CompareArgs),

    #[command(about = "Show the highest version among v-prefixed release tags")]
    Latest(LatestArgs),

    #[command(about = "Check the release feed for a newer version")]
    Check(CheckArgs),

    #[command(about = "Show or change preferences")]
    Prefs(PrefsArgs),
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let global_args = &cli.global_args;

    let color = match global_args.color {
        clap::ColorChoice::Always => anstream::ColorChoice::Always,
        clap::ColorChoice::Never => anstream::ColorChoice::Never,
        clap::ColorChoice::Auto => anstream::ColorChoice::Auto,
    };
    color.write_global();
    init_tracing(global_args, color);

    match cli.command {
        Commands::Compare(args) => commands::compare::compare(args)?,
        Commands::Latest(args) => commands::latest::latest(args)?,
        Commands::Check(args) => commands::check::check(global_args, args).await?,
        Commands::Prefs(args) => commands::prefs::prefs(global_args, args)?,
    }

    Ok(())
}

fn init_tracing(global_args: &GlobalArgs, color: anstream::ColorChoice) {
    let filter = EnvFilter::builder()
        .with_default_directive(global_args.verbose.tracing_level_filter().into())
        .with_env_var("ENCORE_LOG")
        .from_env_lossy();

    let ansi = match color {
        anstream::ColorChoice::Always | anstream::ColorChoice::AlwaysAnsi => true,
        anstream::ColorChoice::Never => false,
        anstream::ColorChoice::Auto => std::io::stderr().is_terminal(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .init();
}
