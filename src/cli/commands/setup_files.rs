//! The `custard setup-files` command.
//!
//! Prints the merged ci-setup of each package as one JSON object keyed by
//! package path. Validation errors across all packages are reported
//! together.

use crate::cli::args::SetupFilesArgs;
use crate::config::{find_setup_files, Config};
use crate::error::{CustardError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The setup-files command implementation.
pub struct SetupFilesCommand {
    args: SetupFilesArgs,
}

impl SetupFilesCommand {
    /// Create a new setup-files command.
    pub fn new(args: SetupFilesArgs) -> Self {
        Self { args }
    }
}

impl Command for SetupFilesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = Config::load(&self.args.config)?;
        let (setups, errors) = find_setup_files(&config, &self.args.checkout, &self.args.packages);

        if !errors.is_empty() {
            for error in &errors {
                ui.error(error);
            }
            if let Some(url) = &config.ci_setup_help_url {
                ui.info(&format!("See {} for more information.", url));
            }
            return Ok(CommandResult::failure(1));
        }

        let json = serde_json::to_string_pretty(&setups)
            .map_err(|e| CustardError::Other(anyhow::Error::from(e)))?;
        ui.result(&json);
        Ok(CommandResult::success())
    }
}
