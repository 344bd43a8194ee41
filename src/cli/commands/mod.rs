//! Command implementations.

pub mod affected;
pub mod completions;
pub mod dispatcher;
pub mod packages;
pub mod run;
pub mod setup_files;
pub mod version;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
