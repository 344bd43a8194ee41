//! Error types for custard operations.
//!
//! This module defines [`CustardError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Parse and validation errors are fatal for the file they concern
//! - Validation errors carry every violation found, not just the first
//! - Per-package run failures are aggregated into [`CustardError::PackagesFailed`]
//! - No variant ever carries a secret value

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for custard operations.
#[derive(Debug, Error)]
pub enum CustardError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a config or ci-setup file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Config file violates the schema.
    #[error("Invalid configuration in {path}:\n  {}", .errors.join("\n  "))]
    ConfigValidationError { path: PathBuf, errors: Vec<String> },

    /// A package's ci-setup file violates the schema.
    #[error(
        "Invalid ci-setup file {path}:\n  {}{}",
        .errors.join("\n  "),
        help_suffix(.help_url)
    )]
    SetupValidationError {
        path: PathBuf,
        errors: Vec<String>,
        help_url: Option<String>,
    },

    /// Variable substitution found a reference cycle.
    #[error("Circular variable reference: {chain}")]
    CircularReference { chain: String },

    /// A project, secret, or identity-token backend failed.
    #[error("{provider} failed for '{key}': {message}")]
    Provider {
        provider: String,
        key: String,
        message: String,
    },

    /// The requested command is not defined in the config.
    #[error("Command '{name}' is not defined, available commands: [{available}]")]
    UnknownCommand { name: String, available: String },

    /// Shell command could not be started or exited non-zero.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A `pre` or `post` step failed, aborting the whole invocation.
    #[error("{phase} step failed with exit code {code:?}: {command}")]
    PhaseFailed {
        phase: String,
        command: String,
        code: Option<i32>,
    },

    /// One or more packages failed their `run` steps.
    #[error("{} package(s) failed: {}", .failed.len(), .failed.join(", "))]
    PackagesFailed { failed: Vec<String> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn help_suffix(help_url: &Option<String>) -> String {
    match help_url {
        Some(url) => format!("\nSee {} for more information.", url),
        None => String::new(),
    }
}

/// Result type alias for custard operations.
pub type Result<T> = std::result::Result<T, CustardError>;
