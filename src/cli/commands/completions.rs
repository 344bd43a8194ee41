//! The `custard completions` command.
//!
//! The script is rendered into memory and emitted as a result, so it goes to
//! stdout while diagnostics stay on stderr.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::UserInterface;
use clap::CommandFactory;
use clap_complete::Shell;

use super::dispatcher::{Command, CommandResult};

/// Render the completion script for `shell`.
pub fn completion_script(shell: Shell) -> String {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, name, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Prints a shell completion script.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let script = completion_script(self.args.shell);
        tracing::debug!(shell = %self.args.shell, bytes = script.len(), "generated completions");
        ui.result(script.trim_end_matches('\n'));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    fn run(shell: Shell) -> String {
        let mut ui = MockUI::new();
        let result = CompletionsCommand::new(CompletionsArgs { shell })
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert_eq!(ui.results().len(), 1);
        ui.results()[0].clone()
    }

    #[test]
    fn bash_script_offers_every_subcommand() {
        let script = run(Shell::Bash);
        for subcommand in ["affected", "run", "setup-files", "packages", "version"] {
            assert!(script.contains(subcommand), "missing {}", subcommand);
        }
        assert!(script.contains("--verbosity"));
    }

    #[test]
    fn zsh_script_is_named_after_the_binary() {
        assert!(run(Shell::Zsh).contains("#compdef custard"));
    }

    #[test]
    fn script_goes_to_results_not_diagnostics() {
        let mut ui = MockUI::new();
        CompletionsCommand::new(CompletionsArgs { shell: Shell::Fish })
            .execute(&mut ui)
            .unwrap();
        assert_eq!(ui.all_diagnostics().count(), 0);
        assert!(!ui.results()[0].ends_with('\n'));
    }
}
