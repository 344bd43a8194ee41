//! Custard - affected-package detection and CI command running for monorepos.
//!
//! Given a list of changed files, custard works out which packages of a
//! monorepo they affect, resolves each package's CI settings and variables,
//! and runs configured commands over those packages.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Config and ci-setup loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`packages`] - Path patterns and affected-package resolution
//! - [`runner`] - Running command phases over packages
//! - [`shell`] - Shell command execution
//! - [`ui`] - Diagnostics and result output
//! - [`variables`] - Variable precedence, interpolation, and backends
//!
//! # Example
//!
//! ```
//! use custard::variables::substitute;
//! use std::collections::BTreeMap;
//!
//! let values = BTreeMap::from([
//!     ("PROJECT_ID".to_string(), "my-project".to_string()),
//!     ("BUCKET".to_string(), "${PROJECT_ID}-data".to_string()),
//! ]);
//! assert_eq!(substitute(&values, "gs://$BUCKET").unwrap(), "gs://my-project-data");
//! ```
//!
//! For file-based workflows, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod packages;
pub mod runner;
pub mod shell;
pub mod ui;
pub mod variables;

pub use error::{CustardError, Result};
