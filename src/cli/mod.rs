//! Command-line interface for Custard.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    AffectedArgs, Cli, Commands, CompletionsArgs, PackagesArgs, RunArgs, SetupFilesArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
