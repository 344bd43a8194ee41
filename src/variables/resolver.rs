//! Variable precedence.
//!
//! Every variable comes from exactly one of four sources, first match wins:
//!
//! 1. The environment the invocation started with (user defined)
//! 2. The package's ci-setup file
//! 3. The config's `ci-setup-defaults`
//! 4. An automatic generator computed at run time
//!
//! Only keys known to sources 2 to 4 are emitted. Arbitrary ambient
//! environment variables are never exported as variables.

use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Where a variable's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VariableSource {
    UserDefined,
    CiSetupFile,
    DefaultValue,
    AutomaticVar,
}

impl fmt::Display for VariableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableSource::UserDefined => "user defined",
            VariableSource::CiSetupFile => "ci-setup file",
            VariableSource::DefaultValue => "default value",
            VariableSource::AutomaticVar => "automatic",
        };
        f.write_str(name)
    }
}

/// A resolved variable.
#[derive(Clone, PartialEq, Eq)]
pub struct Variable {
    pub key: String,
    pub value: String,
    pub source: VariableSource,
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>, source: VariableSource) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            source,
        }
    }

    /// Describe the variable including its value.
    pub fn describe(&self) -> String {
        format!("{}={:?} ({})", self.key, self.value, self.source)
    }

    /// Describe the variable without its value, for secrets.
    pub fn describe_redacted(&self) -> String {
        format!("{} ({})", self.key, self.source)
    }
}

// Values may be secrets, so Debug never prints them.
impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("key", &self.key)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// A snapshot of environment variables.
pub type EnvSnapshot = BTreeMap<String, String>;

/// Computes an automatic variable on demand.
pub type Generator<'a> = Box<dyn Fn() -> Result<String> + 'a>;

/// Automatic generators keyed by variable name.
pub type Generators<'a> = BTreeMap<String, Generator<'a>>;

/// Resolve variables by precedence.
///
/// `transform` is applied to file and default values but never to values
/// from `env`. Generators run only for keys no other source provides.
/// Output is sorted by key.
///
/// # Example
///
/// ```
/// use custard::variables::{list_variables, EnvSnapshot, Generators, VariableSource};
/// use std::collections::BTreeMap;
///
/// let env = EnvSnapshot::from([("VAR".to_string(), "u".to_string())]);
/// let file = BTreeMap::from([("VAR".to_string(), "s".to_string())]);
/// let vars = list_variables(&env, &file, &BTreeMap::new(), &Generators::new(), |v| Ok(v.to_string())).unwrap();
/// assert_eq!(vars[0].value, "u");
/// assert_eq!(vars[0].source, VariableSource::UserDefined);
/// ```
pub fn list_variables<F>(
    env: &EnvSnapshot,
    file_values: &BTreeMap<String, String>,
    default_values: &BTreeMap<String, String>,
    automatic: &Generators<'_>,
    transform: F,
) -> Result<Vec<Variable>>
where
    F: Fn(&str) -> Result<String>,
{
    let keys: BTreeSet<&String> = automatic
        .keys()
        .chain(default_values.keys())
        .chain(file_values.keys())
        .collect();

    let mut variables = Vec::with_capacity(keys.len());
    for key in keys {
        let variable = if let Some(value) = env.get(key) {
            Variable::new(key, value, VariableSource::UserDefined)
        } else if let Some(value) = file_values.get(key) {
            Variable::new(key, transform(value)?, VariableSource::CiSetupFile)
        } else if let Some(value) = default_values.get(key) {
            Variable::new(key, transform(value)?, VariableSource::DefaultValue)
        } else if let Some(generate) = automatic.get(key) {
            Variable::new(key, generate()?, VariableSource::AutomaticVar)
        } else {
            continue;
        };
        tracing::trace!(key = %variable.key, source = %variable.source, "resolved variable");
        variables.push(variable);
    }

    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CustardError;
    use std::cell::Cell;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn identity(value: &str) -> Result<String> {
        Ok(value.to_string())
    }

    fn automatic_var() -> Generators<'static> {
        let mut generators = Generators::new();
        generators.insert("VAR".to_string(), Box::new(|| Ok("a".to_string())));
        generators
    }

    fn resolve(
        env: &[(&str, &str)],
        file: &[(&str, &str)],
        defaults: &[(&str, &str)],
    ) -> Vec<Variable> {
        list_variables(&map(env), &map(file), &map(defaults), &automatic_var(), identity).unwrap()
    }

    #[test]
    fn user_defined_wins() {
        let vars = resolve(&[("VAR", "u")], &[("VAR", "s")], &[("VAR", "d")]);
        assert_eq!(vars, vec![Variable::new("VAR", "u", VariableSource::UserDefined)]);
    }

    #[test]
    fn ci_setup_file_beats_default() {
        let vars = resolve(&[], &[("VAR", "s")], &[("VAR", "d")]);
        assert_eq!(vars, vec![Variable::new("VAR", "s", VariableSource::CiSetupFile)]);
    }

    #[test]
    fn default_beats_automatic() {
        let vars = resolve(&[], &[], &[("VAR", "d")]);
        assert_eq!(vars, vec![Variable::new("VAR", "d", VariableSource::DefaultValue)]);
    }

    #[test]
    fn automatic_is_last_resort() {
        let vars = resolve(&[], &[], &[]);
        assert_eq!(vars, vec![Variable::new("VAR", "a", VariableSource::AutomaticVar)]);
    }

    #[test]
    fn env_only_keys_are_not_emitted() {
        let vars = resolve(&[("HOME", "/root"), ("VAR", "u")], &[], &[]);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].key, "VAR");
    }

    #[test]
    fn transform_skips_user_defined_values() {
        let env = map(&[("A", "raw")]);
        let file = map(&[("A", "file"), ("B", "file")]);
        let defaults = map(&[("C", "default")]);
        let vars = list_variables(&env, &file, &defaults, &Generators::new(), |v| {
            Ok(v.to_uppercase())
        })
        .unwrap();
        let values: Vec<&str> = vars.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(values, vec!["raw", "FILE", "DEFAULT"]);
    }

    #[test]
    fn generators_run_only_when_needed() {
        let calls = Cell::new(0);
        let mut generators = Generators::new();
        generators.insert(
            "VAR".to_string(),
            Box::new(|| {
                calls.set(calls.get() + 1);
                Ok("a".to_string())
            }),
        );
        list_variables(&map(&[("VAR", "u")]), &map(&[]), &map(&[]), &generators, identity)
            .unwrap();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn transform_errors_propagate() {
        let result = list_variables(
            &map(&[]),
            &map(&[("S", "p/s")]),
            &map(&[]),
            &Generators::new(),
            |_| {
                Err(CustardError::Provider {
                    provider: "secret store".into(),
                    key: "p/s".into(),
                    message: "denied".into(),
                })
            },
        );
        assert!(matches!(result, Err(CustardError::Provider { .. })));
    }

    #[test]
    fn output_is_sorted_by_key() {
        let vars = resolve(&[], &[("Z", "1"), ("B", "2")], &[("M", "3")]);
        let keys: Vec<&str> = vars.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["B", "M", "VAR", "Z"]);
    }

    #[test]
    fn debug_never_shows_value() {
        let var = Variable::new("TOKEN", "hunter2", VariableSource::CiSetupFile);
        assert!(!format!("{:?}", var).contains("hunter2"));
        assert!(!var.describe_redacted().contains("hunter2"));
        assert_eq!(var.describe_redacted(), "TOKEN (ci-setup file)");
    }
}
