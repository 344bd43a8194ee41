//! Command execution over packages.

pub mod command_runner;
pub mod overlay;

pub use command_runner::{CommandRunner, PackageResult, RunSummary};
pub use overlay::{EnvOverlay, GOOGLE_SAMPLES_PROJECT};
