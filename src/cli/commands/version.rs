//! The `custard version` command.

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints the crate version.
pub struct VersionCommand;

impl Command for VersionCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.result(&format!("custard {}", env!("CARGO_PKG_VERSION")));
        Ok(CommandResult::success())
    }
}
