//! Configuration loading, parsing, and validation.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File loading and saving in [`loader`]
//! - Validation in [`validator`]
//! - Per-package ci-setup files in [`setup`]
//!
//! # Example
//!
//! ```
//! use custard::config::Config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.jsonc");
//! fs::write(&path, r#"{
//!   // Every Go module is a package.
//!   "package-file": "go.mod",
//!   "commands": {"test": {"run": "go test ./..."}}
//! }"#).unwrap();
//!
//! let config = Config::load(&path).unwrap();
//! assert_eq!(config.package_file, vec!["go.mod"]);
//! assert_eq!(config.match_patterns, vec!["*"]);
//! ```

pub mod loader;
pub mod schema;
pub mod setup;
pub mod validator;

// Schema re-exports
pub use schema::{
    string_map, CiSetup, CommandConfig, Config, SetupValue, ValueKind,
    DEFAULT_CI_SETUP_FILENAMES, ENV_FIELD, SECRETS_FIELD,
};

// Loader re-exports
pub use loader::{load_config, parse_config, parse_jsonc};

// Validator re-exports
pub use validator::{validate_ci_setup, validate_config_value};

// Setup re-exports
pub use setup::{find_ci_setup_file, find_setup_files, load_ci_setup, merge_with_defaults};
