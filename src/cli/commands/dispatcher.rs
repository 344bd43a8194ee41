//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;
use crate::variables::{GcloudProviders, Providers};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// Results go to `ui.result`, everything else is a diagnostic.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    providers: Box<dyn Providers>,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandDispatcher {
    /// Create a dispatcher backed by the `gcloud` CLI.
    pub fn new() -> Self {
        Self::with_providers(Box::new(GcloudProviders::default()))
    }

    /// Create a dispatcher with custom project, secret, and token backends.
    pub fn with_providers(providers: Box<dyn Providers>) -> Self {
        Self { providers }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Affected(args) => super::affected::AffectedCommand::new(args.clone()).execute(ui),
            Commands::Run(args) => {
                super::run::RunCommand::new(args.clone(), self.providers.as_ref()).execute(ui)
            }
            Commands::SetupFiles(args) => {
                super::setup_files::SetupFilesCommand::new(args.clone()).execute(ui)
            }
            Commands::Packages(args) => super::packages::PackagesCommand::new(args.clone()).execute(ui),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            Commands::Version => super::version::VersionCommand.execute(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatches_version() {
        let cli = Cli::parse_from(["custard", "version"]);
        let mut ui = MockUI::new();
        let result = CommandDispatcher::new().dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert_eq!(ui.results().len(), 1);
    }
}
