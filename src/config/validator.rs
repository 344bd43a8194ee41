//! Configuration validation rules.
//!
//! This module validates config and ci-setup files for correctness:
//! - Only known fields may appear
//! - List fields must be a string or a list of strings
//! - `env` and `secrets` must map strings to strings
//! - ci-setup values must have the same shape as their configured default
//!
//! Every check runs and all errors are collected, so users can fix multiple
//! issues at once.

use crate::config::schema::{CiSetup, Config, ENV_FIELD, SECRETS_FIELD};
use serde_json::Value;
use std::collections::BTreeSet;

/// Fields allowed at the top level of a config file.
pub const CONFIG_FIELDS: [&str; 8] = [
    "package-file",
    "ci-setup-filename",
    "ci-setup-defaults",
    "ci-setup-help-url",
    "match",
    "ignore",
    "commands",
    "exclude-packages",
];

/// Fields allowed under `commands.<name>`.
pub const COMMAND_FIELDS: [&str; 3] = ["pre", "run", "post"];

const LIST_FIELDS: [&str; 5] = [
    "package-file",
    "ci-setup-filename",
    "match",
    "ignore",
    "exclude-packages",
];

/// Validate a raw config value and return all errors.
pub fn validate_config_value(value: &Value) -> Vec<String> {
    let Some(object) = value.as_object() else {
        return vec!["config must be a JSON object".to_string()];
    };

    let mut errors = Vec::new();

    match object.get("package-file") {
        None => errors.push("package-file is required".to_string()),
        Some(v) if is_string_or_list(v) && is_blank(v) => {
            errors.push("'package-file' must not be empty".to_string());
        }
        Some(_) => {}
    }

    for key in object.keys() {
        if !CONFIG_FIELDS.contains(&key.as_str()) {
            errors.push(format!(
                "Unexpected field '{}': valid fields are [{}]",
                key,
                sorted(&CONFIG_FIELDS).join(" ")
            ));
        }
    }

    for field in LIST_FIELDS {
        if let Some(v) = object.get(field) {
            if !is_string_or_list(v) {
                errors.push(format!(
                    "'{}' must be a string or a list of strings",
                    field
                ));
            }
        }
    }

    if let Some(v) = object.get("ci-setup-help-url") {
        if !v.is_string() {
            errors.push("'ci-setup-help-url' must be a string".to_string());
        }
    }

    if let Some(defaults) = object.get("ci-setup-defaults") {
        errors.extend(validate_defaults(defaults));
    }

    if let Some(commands) = object.get("commands") {
        errors.extend(validate_commands(commands));
    }

    errors
}

fn validate_defaults(defaults: &Value) -> Vec<String> {
    let Some(object) = defaults.as_object() else {
        return vec!["'ci-setup-defaults' must be an object".to_string()];
    };

    let mut errors = Vec::new();
    for field in [ENV_FIELD, SECRETS_FIELD] {
        if let Some(v) = object.get(field) {
            if !is_string_map(v) {
                errors.push(format!(
                    "'ci-setup-defaults.{}' must be a mapping of strings to strings",
                    field
                ));
            }
        }
    }
    for (key, v) in object {
        if v.is_null() {
            errors.push(format!("'ci-setup-defaults.{}' must not be null", key));
        }
    }
    errors
}

fn validate_commands(commands: &Value) -> Vec<String> {
    let Some(object) = commands.as_object() else {
        return vec!["'commands' must be an object".to_string()];
    };

    let mut errors = Vec::new();
    for (name, command) in object {
        let Some(phases) = command.as_object() else {
            errors.push(format!("'commands.{}' must be an object", name));
            continue;
        };
        for (phase, steps) in phases {
            if !COMMAND_FIELDS.contains(&phase.as_str()) {
                errors.push(format!(
                    "Unexpected field 'commands.{}.{}': valid fields are [{}]",
                    name,
                    phase,
                    sorted(&COMMAND_FIELDS).join(" ")
                ));
            } else if !is_string_or_list(steps) {
                errors.push(format!(
                    "'commands.{}.{}' must be a string or a list of strings",
                    name, phase
                ));
            }
        }
    }
    errors
}

/// Validate a package's ci-setup against the config and return all errors.
///
/// Valid fields are `env`, `secrets`, and every key of `ci-setup-defaults`.
/// Fields starting with `_` are comments and are not checked. Fields missing
/// from the setup are fine, the defaults apply later.
pub fn validate_ci_setup(config: &Config, setup: &CiSetup) -> Vec<String> {
    let mut valid_fields: BTreeSet<&str> = config
        .ci_setup_defaults
        .keys()
        .map(String::as_str)
        .collect();
    valid_fields.insert(ENV_FIELD);
    valid_fields.insert(SECRETS_FIELD);

    let mut errors = Vec::new();

    // BTreeMap iteration keeps the error order stable.
    for (field, value) in setup {
        if field.starts_with('_') {
            continue;
        }

        if field == ENV_FIELD || field == SECRETS_FIELD {
            if value.as_string_map().is_none() {
                errors.push(format!(
                    "Unexpected type on '{}': expected a mapping of strings to strings, but got '{}'",
                    field,
                    value.kind()
                ));
            }
            continue;
        }

        match config.ci_setup_defaults.get(field) {
            None => errors.push(format!(
                "Unexpected field '{}': valid fields are [{}]",
                field,
                valid_fields.iter().copied().collect::<Vec<_>>().join(" ")
            )),
            Some(default) if default.kind() != value.kind() => errors.push(format!(
                "Unexpected type on '{}': expected '{}', but got '{}'",
                field,
                default.kind(),
                value.kind()
            )),
            Some(_) => {}
        }
    }

    errors
}

fn is_string_or_list(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items
            .iter()
            .all(|item| item.as_str().is_some_and(|s| s.trim().is_empty())),
        _ => false,
    }
}

fn is_string_map(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.values().all(Value::is_string))
}

fn sorted<'a>(fields: &[&'a str]) -> Vec<&'a str> {
    let mut fields = fields.to_vec();
    fields.sort_unstable();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_with_defaults(defaults: Value) -> Config {
        Config {
            package_file: vec!["package.json".to_string()],
            ci_setup_defaults: serde_json::from_value(defaults).unwrap(),
            ..Default::default()
        }
    }

    fn setup(value: Value) -> CiSetup {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn valid_config_returns_no_errors() {
        let value = json!({
            "package-file": ["go.mod"],
            "ci-setup-filename": "ci-setup.json",
            "ci-setup-defaults": {"env": {"A": "1"}, "timeout": 10},
            "ci-setup-help-url": "https://example.com",
            "match": ["*"],
            "ignore": "README.md",
            "exclude-packages": [],
            "commands": {"test": {"pre": "echo", "run": ["go test"], "post": []}}
        });
        assert!(validate_config_value(&value).is_empty());
    }

    #[test]
    fn missing_package_file_is_required() {
        let errors = validate_config_value(&json!({"match": ["*"]}));
        assert_eq!(errors, vec!["package-file is required"]);
    }

    #[test]
    fn empty_package_file_is_rejected() {
        for package_file in [json!([]), json!(""), json!([" "])] {
            let errors = validate_config_value(&json!({"package-file": package_file}));
            assert_eq!(errors, vec!["'package-file' must not be empty"]);
        }
        assert!(validate_config_value(&json!({"package-file": ["", "go.mod"]})).is_empty());
    }

    #[test]
    fn unknown_top_level_field() {
        let errors = validate_config_value(&json!({"package-file": "go.mod", "colour": 1}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Unexpected field 'colour'"));
    }

    #[test]
    fn unknown_command_field() {
        let errors = validate_config_value(&json!({
            "package-file": "go.mod",
            "commands": {"lint": {"before": "echo"}}
        }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("commands.lint.before"));
        assert!(errors[0].contains("[post pre run]"));
    }

    #[test]
    fn collects_all_errors() {
        let errors = validate_config_value(&json!({
            "match": 3,
            "ignore": [1, 2],
            "ci-setup-help-url": false,
            "ci-setup-defaults": {"env": {"A": 1}, "secrets": "nope"},
            "commands": {"test": {"run": {"x": 1}}}
        }));
        assert!(errors.contains(&"package-file is required".to_string()));
        assert!(errors.iter().any(|e| e.starts_with("'match'")));
        assert!(errors.iter().any(|e| e.starts_with("'ignore'")));
        assert!(errors.iter().any(|e| e.contains("ci-setup-help-url")));
        assert!(errors.iter().any(|e| e.contains("ci-setup-defaults.env")));
        assert!(errors.iter().any(|e| e.contains("ci-setup-defaults.secrets")));
        assert!(errors.iter().any(|e| e.contains("commands.test.run")));
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn non_object_config() {
        assert_eq!(validate_config_value(&json!([1])).len(), 1);
    }

    #[test]
    fn valid_setup() {
        let config = config_with_defaults(json!({"field1": "x", "field2": "y"}));
        let errors = validate_ci_setup(&config, &setup(json!({"field1": "hello"})));
        assert!(errors.is_empty());
    }

    #[test]
    fn comment_fields_are_skipped() {
        let config = config_with_defaults(json!({"field1": "x"}));
        let errors = validate_ci_setup(
            &config,
            &setup(json!({"_comment1": "a", "_comment2": ["b"]})),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn undefined_field_lists_sorted_valid_fields() {
        let config = config_with_defaults(json!({"field2": "y", "field1": "x"}));
        let errors = validate_ci_setup(&config, &setup(json!({"undefined": ":)"})));
        assert_eq!(
            errors,
            vec!["Unexpected field 'undefined': valid fields are [env field1 field2 secrets]"]
        );
    }

    #[test]
    fn type_mismatch_names_both_types() {
        let config = config_with_defaults(json!({"field1": "x"}));
        let errors = validate_ci_setup(&config, &setup(json!({"field1": 42})));
        assert_eq!(
            errors,
            vec!["Unexpected type on 'field1': expected 'string', but got 'number'"]
        );
    }

    #[test]
    fn multiple_setup_errors_accumulate() {
        let config = config_with_defaults(json!({"field1": "x", "field2": "y"}));
        let errors = validate_ci_setup(
            &config,
            &setup(json!({"undefined": "hello", "field1": 42, "field2": []})),
        );
        assert_eq!(
            errors,
            vec![
                "Unexpected type on 'field1': expected 'string', but got 'number'",
                "Unexpected type on 'field2': expected 'string', but got 'list'",
                "Unexpected field 'undefined': valid fields are [env field1 field2 secrets]",
            ]
        );
    }

    #[test]
    fn env_must_be_string_map() {
        let config = config_with_defaults(json!({}));
        let errors = validate_ci_setup(
            &config,
            &setup(json!({"env": {"A": "1"}, "secrets": {"B": 2}})),
        );
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'secrets'"));
    }

    #[test]
    fn env_and_secrets_are_always_valid_fields() {
        let config = config_with_defaults(json!({}));
        let errors = validate_ci_setup(
            &config,
            &setup(json!({"env": {"A": "1"}, "secrets": {"B": "p/b"}})),
        );
        assert!(errors.is_empty());
    }
}
