//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::ui::Verbosity;

/// Custard - run CI commands only for the packages a change affects.
#[derive(Debug, Parser)]
#[command(name = "custard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Minimum diagnostic level: debug, info, warn, or error
    #[arg(long, global = true, env = "CUSTARD_VERBOSITY", default_value = "info")]
    pub verbosity: Verbosity,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the packages affected by a list of changed files
    Affected(AffectedArgs),

    /// Run a configured command over packages
    Run(RunArgs),

    /// Print the merged ci-setup of packages as JSON
    SetupFiles(SetupFilesArgs),

    /// Print every package in a checkout
    Packages(PackagesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Print the version
    Version,
}

/// Arguments for the `affected` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AffectedArgs {
    /// Path to the config file
    pub config: PathBuf,

    /// File listing changed paths, one per line
    pub diffs: PathBuf,

    /// Root of the checkout the paths are relative to
    #[arg(default_value = ".")]
    pub checkout: PathBuf,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Path to the config file
    pub config: PathBuf,

    /// Name of the command to run
    pub command: String,

    /// Package directories to run in
    pub packages: Vec<String>,

    /// Root of the checkout the packages are relative to
    #[arg(long, default_value = ".")]
    pub checkout: PathBuf,
}

/// Arguments for the `setup-files` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SetupFilesArgs {
    /// Path to the config file
    pub config: PathBuf,

    /// Package directories to load
    pub packages: Vec<String>,

    /// Root of the checkout the packages are relative to
    #[arg(long, default_value = ".")]
    pub checkout: PathBuf,
}

/// Arguments for the `packages` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PackagesArgs {
    /// Path to the config file
    pub config: PathBuf,

    /// Root of the checkout to search
    #[arg(default_value = ".")]
    pub checkout: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn affected_defaults_checkout() {
        let cli = Cli::try_parse_from(["custard", "affected", "config.json", "diffs.txt"]).unwrap();
        match cli.command {
            Commands::Affected(args) => {
                assert_eq!(args.config, PathBuf::from("config.json"));
                assert_eq!(args.diffs, PathBuf::from("diffs.txt"));
                assert_eq!(args.checkout, PathBuf::from("."));
            }
            other => panic!("expected affected, got {:?}", other),
        }
    }

    #[test]
    fn run_takes_many_packages() {
        let cli =
            Cli::try_parse_from(["custard", "run", "config.json", "test", "a", "b/c"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.command, "test");
                assert_eq!(args.packages, vec!["a", "b/c"]);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn verbosity_is_parsed() {
        let cli = Cli::try_parse_from(["custard", "--verbosity", "WARN", "version"]).unwrap();
        assert_eq!(cli.verbosity, Verbosity::Warn);
    }

    #[test]
    fn invalid_verbosity_is_rejected() {
        let result = Cli::try_parse_from(["custard", "--verbosity", "loud", "version"]);
        assert!(result.is_err());
    }
}
