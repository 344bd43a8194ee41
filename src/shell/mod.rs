//! Shell command execution.

pub mod command;

pub use command::{execute, execute_quiet, CommandOptions, CommandResult};
