use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::suggest::Field;

#[derive(Parser)]
#[command(name = "hotelsearch")]
#[command(about = "hotelsearch - Free-text hotel search with destination and hotel autocomplete.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, default_value = "config.toml", action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Run a one-off search against the catalog and print the results as JSON.
    Search {
        /// Free-text query, eg: "hotels in galle".
        query: String,
    },

    /// Print autocomplete suggestions for a search-bar field as JSON.
    Suggest {
        /// Field to complete.
        #[arg(long, value_enum, default_value = "destination")]
        field: FieldArg,

        /// Partial text typed into the field.
        text: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FieldArg {
    Destination,
    Hotel,
}

impl From<FieldArg> for Field {
    fn from(f: FieldArg) -> Self {
        match f {
            FieldArg::Destination => Field::Destination,
            FieldArg::Hotel => Field::Hotel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args() {
        let cli = Cli::parse_from([
            "hotelsearch",
            "--config",
            "a.toml",
            "--config",
            "b.toml",
            "suggest",
            "--field",
            "hotel",
            "fort",
        ]);
        assert_eq!(cli.config.len(), 2);
        match cli.command {
            Some(Commands::Suggest { field, text }) => {
                assert_eq!(Field::from(field), Field::Hotel);
                assert_eq!(text, "fort");
            }
            _ => panic!("expected suggest"),
        }

        let cli = Cli::parse_from(["hotelsearch"]);
        assert_eq!(cli.config, vec![PathBuf::from("config.toml")]);
        assert!(cli.command.is_none());
    }
}
