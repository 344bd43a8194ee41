//! The `custard packages` command.

use crate::cli::args::PackagesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::packages::find_all_packages;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints every package in a checkout, one per line.
pub struct PackagesCommand {
    args: PackagesArgs,
}

impl PackagesCommand {
    /// Create a new packages command.
    pub fn new(args: PackagesArgs) -> Self {
        Self { args }
    }
}

impl Command for PackagesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = Config::load(&self.args.config)?;
        for package in find_all_packages(&config, &self.args.checkout)? {
            ui.result(&package);
        }
        Ok(CommandResult::success())
    }
}
