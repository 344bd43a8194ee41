//! Configuration file loading and saving.
//!
//! Config and ci-setup files are JSON, optionally with `//` and `/* */`
//! comments. Files are parsed to a raw value first so that validation can
//! report every problem at once before deserializing.

use crate::config::schema::Config;
use crate::config::validator::validate_config_value;
use crate::error::{CustardError, Result};
use jsonc_parser::ParseOptions;
use std::fs;
use std::path::Path;

/// Read a file, mapping a missing file to `ConfigNotFound`.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CustardError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CustardError::Io(e)
        }
    })
}

/// Parse JSON-with-comments text into a raw value.
///
/// # Arguments
///
/// * `content` - The text to parse
/// * `source_path` - Path for error reporting
pub fn parse_jsonc(content: &str, source_path: &Path) -> Result<serde_json::Value> {
    let parsed = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default()).map_err(
        |e| CustardError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        },
    )?;

    parsed.ok_or_else(|| CustardError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: "file is empty".to_string(),
    })
}

/// Parse and validate config text.
///
/// # Errors
///
/// Returns `ConfigParseError` if the text is not valid JSON.
/// Returns `ConfigValidationError` with every violation if the schema check fails.
pub fn parse_config(content: &str, source_path: &Path) -> Result<Config> {
    let value = parse_jsonc(content, source_path)?;

    let errors = validate_config_value(&value);
    if !errors.is_empty() {
        return Err(CustardError::ConfigValidationError {
            path: source_path.to_path_buf(),
            errors,
        });
    }

    // Absent fields keep the defaults from `Config::default()`, including `match = ["*"]`.
    serde_json::from_value(value).map_err(|e| CustardError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = read_file(path)?;
    let config = parse_config(&content, path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

impl Config {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        load_config(path)
    }

    /// Write this config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CommandConfig, SetupValue};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn parse_minimal_config() {
        let config = parse_config(r#"{"package-file": "package.json"}"#, Path::new("c.json"))
            .unwrap();
        assert_eq!(config.package_file, vec!["package.json"]);
        assert_eq!(config.match_patterns, vec!["*"]);
    }

    #[test]
    fn parse_config_with_comments() {
        let content = r#"
        // Line comment.
        {
          /* Block comment. */
          "package-file": ["package.json"], // trailing comment
        }
        "#;
        let config = parse_config(content, Path::new("c.jsonc")).unwrap();
        assert_eq!(config.package_file, vec!["package.json"]);
    }

    #[test]
    fn empty_object_fails_required_field() {
        let result = parse_config("{}", Path::new("empty.json"));
        match result {
            Err(CustardError::ConfigValidationError { errors, .. }) => {
                assert!(errors.iter().any(|e| e.contains("package-file is required")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn empty_package_file_list_is_rejected() {
        let result = parse_config(r#"{"package-file": []}"#, Path::new("c.json"));
        match result {
            Err(CustardError::ConfigValidationError { errors, .. }) => {
                assert_eq!(errors, vec!["'package-file' must not be empty"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn empty_file_is_parse_error() {
        let result = parse_config("", Path::new("empty.json"));
        assert!(matches!(result, Err(CustardError::ConfigParseError { .. })));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result = parse_config(r#"{"package-file": "#, Path::new("bad.json"));
        assert!(matches!(result, Err(CustardError::ConfigParseError { .. })));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config(&temp.path().join("nope.json"));
        assert!(matches!(result, Err(CustardError::ConfigNotFound { .. })));
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let mut defaults = BTreeMap::new();
        defaults.insert(
            "timeout".to_string(),
            SetupValue::Number(30.0),
        );
        let mut commands = BTreeMap::new();
        commands.insert(
            "test".to_string(),
            CommandConfig {
                run: Some(vec!["npm test".to_string()]),
                ..Default::default()
            },
        );
        let config = Config {
            package_file: vec!["package.json".to_string()],
            ignore_patterns: vec!["node_modules/".to_string(), "*.md".to_string()],
            match_patterns: vec!["*.js".to_string()],
            exclude_packages: vec!["excluded".to_string()],
            ci_setup_defaults: defaults,
            ci_setup_help_url: Some("https://example.com".to_string()),
            commands,
            ..Default::default()
        };

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
