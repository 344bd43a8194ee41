//! The `custard run` command.

use crate::cli::args::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::runner::CommandRunner;
use crate::ui::UserInterface;
use crate::variables::{process_env, Providers, VariableResolver};

use super::dispatcher::{Command, CommandResult};

/// Runs a configured command over the given packages.
pub struct RunCommand<'a> {
    args: RunArgs,
    providers: &'a dyn Providers,
}

impl<'a> RunCommand<'a> {
    /// Create a new run command.
    pub fn new(args: RunArgs, providers: &'a dyn Providers) -> Self {
        Self { args, providers }
    }
}

impl Command for RunCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = Config::load(&self.args.config)?;
        let resolver = VariableResolver::new(process_env(), self.providers);
        let runner = CommandRunner::new(&config, &self.args.checkout, &resolver);

        if self.args.packages.is_empty() {
            ui.warning("No packages given, only pre and post steps will run.");
        }
        runner.run(&self.args.command, &self.args.packages, ui)?;
        Ok(CommandResult::success())
    }
}
