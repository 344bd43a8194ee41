//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the config file
//! and the per-package ci-setup file formats.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default ci-setup candidates, comment-capable format first.
pub const DEFAULT_CI_SETUP_FILENAMES: [&str; 2] = ["ci-setup.jsonc", "ci-setup.json"];

/// Root configuration structure.
///
/// Loaded once per invocation and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Marker filenames that make a directory a package (e.g. `go.mod`).
    #[serde(deserialize_with = "one_or_many")]
    pub package_file: Vec<String>,

    /// Candidate ci-setup filenames, tried in order.
    #[serde(deserialize_with = "one_or_many")]
    pub ci_setup_filename: Vec<String>,

    /// Values used when a ci-setup file or field is missing.
    ///
    /// Its keys also define which fields are valid in ci-setup files.
    pub ci_setup_defaults: CiSetup,

    /// Shown when a ci-setup file fails validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_setup_help_url: Option<String>,

    /// Patterns a path must match to be considered.
    #[serde(rename = "match", deserialize_with = "one_or_many")]
    pub match_patterns: Vec<String>,

    /// Patterns that exclude a path even if it matches.
    #[serde(rename = "ignore", deserialize_with = "one_or_many")]
    pub ignore_patterns: Vec<String>,

    /// Package directories that are never reported, by exact path.
    #[serde(deserialize_with = "one_or_many")]
    pub exclude_packages: Vec<String>,

    /// Named commands runnable over packages.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, CommandConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_file: Vec::new(),
            ci_setup_filename: DEFAULT_CI_SETUP_FILENAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ci_setup_defaults: CiSetup::new(),
            ci_setup_help_url: None,
            match_patterns: vec!["*".to_string()],
            ignore_patterns: Vec::new(),
            exclude_packages: Vec::new(),
            commands: BTreeMap::new(),
        }
    }
}

/// A named command: three optional phases of shell steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Steps run once at the root before any package.
    #[serde(
        deserialize_with = "optional_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub pre: Option<Vec<String>>,

    /// Steps run inside every package.
    #[serde(
        deserialize_with = "optional_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub run: Option<Vec<String>>,

    /// Steps run once at the root after every package.
    #[serde(
        deserialize_with = "optional_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub post: Option<Vec<String>>,
}

/// Per-package ci-setup values, keyed by field name.
pub type CiSetup = BTreeMap<String, SetupValue>;

/// Reserved ci-setup field holding environment variables.
pub const ENV_FIELD: &str = "env";

/// Reserved ci-setup field holding secret references.
pub const SECRETS_FIELD: &str = "secrets";

/// The value shapes a ci-setup field may hold.
///
/// Validation compares [`SetupValue::kind`] against the configured default,
/// so a field can never silently change shape between packages. `Null` is
/// only kept so a `null` in a setup file is reported as a type error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetupValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<SetupValue>),
    Map(BTreeMap<String, SetupValue>),
}

/// Shape tag of a [`SetupValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    List,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

impl SetupValue {
    /// Get the shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            SetupValue::Null => ValueKind::Null,
            SetupValue::Bool(_) => ValueKind::Bool,
            SetupValue::Number(_) => ValueKind::Number,
            SetupValue::String(_) => ValueKind::String,
            SetupValue::List(_) => ValueKind::List,
            SetupValue::Map(_) => ValueKind::Map,
        }
    }

    /// View a string-to-string map, if this value is one.
    pub fn as_string_map(&self) -> Option<BTreeMap<String, String>> {
        let SetupValue::Map(map) = self else {
            return None;
        };
        map.iter()
            .map(|(k, v)| match v {
                SetupValue::String(s) => Some((k.clone(), s.clone())),
                _ => None,
            })
            .collect()
    }
}

/// The string map stored under `field`, or an empty map.
///
/// Callers validate the setup first, so a non-map value is treated as absent.
pub fn string_map(setup: &CiSetup, field: &str) -> BTreeMap<String, String> {
    setup
        .get(field)
        .and_then(SetupValue::as_string_map)
        .unwrap_or_default()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Accept either a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    OneOrMany::deserialize(deserializer).map(Into::into)
}

fn optional_one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<OneOrMany>::deserialize(deserializer).map(|v| v.map(Into::into))
}
