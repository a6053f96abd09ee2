use std::collections::BTreeMap;

use anstream::println;
use clap::{Args, Subcommand};
use encore_prefs::{KnownKey, PreferenceStore};
use encore_release::Repository;
use encore_release::repository::InvalidRepository;
use owo_colors::OwoColorize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::GlobalArgs;
use crate::commands::OutputFormat;
use crate::config::Config;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigError(#[from] crate::config::Error),
    #[error(transparent)]
    PrefsError(#[from] encore_prefs::Error),
    #[error(transparent)]
    InvalidRepository(#[from] InvalidRepository),
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: PrefsCommand,
}

#[derive(Subcommand)]
pub enum PrefsCommand {
    #[command(about = "List every preference with its current value")]
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    #[command(about = "Show the current value of a preference")]
    Get {
        /// Preference name
        key: KnownKey,
    },

    #[command(about = "Change a preference")]
    Set {
        /// Preference name
        key: KnownKey,

        /// New value. An empty string clears optional preferences.
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    #[command(about = "Restore the default value of a preference")]
    Reset {
        /// Preference name
        key: KnownKey,
    },
}

pub(crate) fn prefs(global_args: &GlobalArgs, args: PrefsArgs) -> Result<()> {
    let config = Config::new(global_args)?;
    let mut store = config.preferences()?;

    match args.command {
        PrefsCommand::List { format } => list(&store, format)?,
        PrefsCommand::Get { key } => {
            let value = match store.get_raw(key.name()) {
                Some(raw) => key.decode(raw)?,
                None => key.default_value(),
            };
            println!("{}", display_value(&value));
        }
        PrefsCommand::Set { key, value } => {
            let parsed = key.parse_value(&value)?;
            if key == KnownKey::UpdateRepository {
                value.trim().parse::<Repository>()?;
            }
            debug!("Setting {key} to {parsed} in {}", config.preferences_path());
            store.set_raw(key.name(), parsed)?;
        }
        PrefsCommand::Reset { key } => store.remove(key.name())?,
    }

    Ok(())
}

fn list(store: &impl PreferenceStore, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let values: BTreeMap<&str, Value> = KnownKey::ALL
                .into_iter()
                .map(|key| (key.name(), effective_value(store, key).0))
                .collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        OutputFormat::Text => {
            for key in KnownKey::ALL {
                let (value, source) = effective_value(store, key);
                let value = display_value(&value);
                match source {
                    Source::Stored => println!("{} = {value}", key.name().cyan()),
                    Source::Default => {
                        println!("{} = {value} {}", key.name().cyan(), "(default)".dimmed())
                    }
                    Source::Ignored => println!(
                        "{} = {value} {}",
                        key.name().cyan(),
                        "(default, stored value ignored)".yellow()
                    ),
                }
            }
        }
    }

    Ok(())
}

enum Source {
    Stored,
    Default,
    /// The stored value does not decode, so typed reads use the default.
    Ignored,
}

fn effective_value(store: &impl PreferenceStore, key: KnownKey) -> (Value, Source) {
    let Some(raw) = store.get_raw(key.name()) else {
        return (key.default_value(), Source::Default);
    };

    match key.decode(raw) {
        Ok(value) => (value, Source::Stored),
        Err(err) => {
            warn!("{err}");
            (key.default_value(), Source::Ignored)
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "none".to_owned(),
        other => other.to_string(),
    }
}
