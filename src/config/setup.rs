//! Per-package ci-setup files.
//!
//! A package may carry a ci-setup file overriding `ci-setup-defaults`.
//! Candidate filenames from the config are tried in order and the first one
//! that exists wins. A package without any setup file simply uses the
//! defaults.

use crate::config::loader::{parse_jsonc, read_file};
use crate::config::schema::{CiSetup, Config};
use crate::config::validator::validate_ci_setup;
use crate::error::{CustardError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Find the ci-setup file for a package directory, if any.
pub fn find_ci_setup_file(config: &Config, package_dir: &Path) -> Option<PathBuf> {
    config
        .ci_setup_filename
        .iter()
        .map(|name| package_dir.join(name))
        .find(|path| path.is_file())
}

/// Load and validate the ci-setup file of a package.
///
/// Returns only the values from the file, without defaults applied. A
/// package with no setup file returns an empty setup.
///
/// # Errors
///
/// Returns `ConfigParseError` if the file is malformed, or
/// `SetupValidationError` listing every violation together with the
/// config's help URL.
pub fn load_ci_setup(config: &Config, package_dir: &Path) -> Result<CiSetup> {
    let Some(path) = find_ci_setup_file(config, package_dir) else {
        tracing::debug!(package = %package_dir.display(), "no ci-setup file");
        return Ok(CiSetup::new());
    };

    let content = read_file(&path)?;
    let value = parse_jsonc(&content, &path)?;
    if !value.is_object() {
        return Err(setup_error(config, &path, vec!["ci-setup must be a JSON object".into()]));
    }
    let setup: CiSetup =
        serde_json::from_value(value).map_err(|e| CustardError::ConfigParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;

    let errors = validate_ci_setup(config, &setup);
    if !errors.is_empty() {
        return Err(setup_error(config, &path, errors));
    }

    tracing::debug!(path = %path.display(), fields = setup.len(), "loaded ci-setup");
    Ok(setup)
}

fn setup_error(config: &Config, path: &Path, errors: Vec<String>) -> CustardError {
    CustardError::SetupValidationError {
        path: path.to_path_buf(),
        errors,
        help_url: config.ci_setup_help_url.clone(),
    }
}

/// Overlay a package's setup values on the configured defaults.
pub fn merge_with_defaults(config: &Config, setup: CiSetup) -> CiSetup {
    let mut merged = config.ci_setup_defaults.clone();
    merged.extend(setup);
    merged
}

/// Load the merged ci-setup of many packages.
///
/// Every package is attempted. Errors are collected across packages, one
/// message per problem, each prefixed with the offending file.
pub fn find_setup_files(
    config: &Config,
    root: &Path,
    packages: &[String],
) -> (BTreeMap<String, CiSetup>, Vec<String>) {
    let mut setups = BTreeMap::new();
    let mut errors = Vec::new();

    for package in packages {
        match load_ci_setup(config, &root.join(package)) {
            Ok(setup) => {
                setups.insert(package.clone(), merge_with_defaults(config, setup));
            }
            Err(CustardError::SetupValidationError { path, errors: e, .. }) => {
                errors.extend(e.iter().map(|msg| format!("{}: {}", path.display(), msg)));
            }
            Err(e) => errors.push(e.to_string()),
        }
    }

    (setups, errors)
}
