//! The `custard affected` command.
//!
//! Reads a newline-delimited list of changed paths and prints the affected
//! packages, one per line.

use std::fs;
use std::path::Path;

use crate::cli::args::AffectedArgs;
use crate::config::Config;
use crate::error::Result;
use crate::packages::affected;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The affected command implementation.
pub struct AffectedCommand {
    args: AffectedArgs,
}

impl AffectedCommand {
    /// Create a new affected command.
    pub fn new(args: AffectedArgs) -> Self {
        Self { args }
    }
}

/// Read a diff list, skipping blank lines.
pub fn read_diffs(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

impl Command for AffectedCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = Config::load(&self.args.config)?;
        let diffs = read_diffs(&self.args.diffs)?;
        ui.debug(&format!("{} changed file(s)", diffs.len()));

        for package in affected(&config, &self.args.checkout, &diffs, ui)? {
            ui.result(&package);
        }
        Ok(CommandResult::success())
    }
}
