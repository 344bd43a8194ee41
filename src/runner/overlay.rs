//! Per-package environment overlays.
//!
//! An overlay holds the variables one package runs with. It is handed to
//! each subprocess on top of the inherited environment and dropped when the
//! package is done, so nothing set for one package is visible to the next.

use crate::variables::{PackageVariables, Variable, VariableSource, PROJECT_ID};
use std::collections::{BTreeMap, BTreeSet};

/// Alias of `PROJECT_ID` set for every package.
pub const GOOGLE_SAMPLES_PROJECT: &str = "GOOGLE_SAMPLES_PROJECT";

/// Environment variables layered over the process environment.
///
/// # Example
///
/// ```
/// use custard::runner::EnvOverlay;
/// use custard::variables::VariableSource;
///
/// let mut overlay = EnvOverlay::new();
/// overlay.set("REGION", "us-central1", VariableSource::DefaultValue);
/// overlay.set_secret("API_KEY", "s3cr3t", VariableSource::CiSetupFile);
///
/// assert_eq!(overlay.get("REGION"), Some("us-central1"));
/// assert_eq!(overlay.source_of("API_KEY"), Some(VariableSource::CiSetupFile));
/// assert!(overlay.describe().iter().all(|line| !line.contains("s3cr3t")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvOverlay {
    vars: BTreeMap<String, String>,
    sources: BTreeMap<String, VariableSource>,
    secrets: BTreeSet<String>,
}

impl EnvOverlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the overlay for a package.
    ///
    /// Secrets are applied after environment variables and win on conflict.
    pub fn from_variables(variables: &PackageVariables) -> Self {
        let mut overlay = Self::new();
        for var in &variables.env {
            overlay.set(&var.key, &var.value, var.source);
        }
        if let Some(project) = variables.env.iter().find(|v| v.key == PROJECT_ID) {
            overlay.set(GOOGLE_SAMPLES_PROJECT, &project.value, project.source);
        }
        for var in &variables.secrets {
            overlay.set_variable_secret(var);
        }
        overlay
    }

    /// Set a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>, source: VariableSource) {
        let key = key.into();
        self.secrets.remove(&key);
        self.sources.insert(key.clone(), source);
        self.vars.insert(key, value.into());
    }

    /// Set a variable whose value must never be displayed.
    pub fn set_secret(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        source: VariableSource,
    ) {
        let key = key.into();
        self.set(key.clone(), value, source);
        self.secrets.insert(key);
    }

    fn set_variable_secret(&mut self, var: &Variable) {
        self.set_secret(&var.key, &var.value, var.source);
    }

    /// Get a variable's value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Get where a variable's value came from.
    pub fn source_of(&self, key: &str) -> Option<VariableSource> {
        self.sources.get(key).copied()
    }

    /// Check if a variable is a secret.
    pub fn is_secret(&self, key: &str) -> bool {
        self.secrets.contains(key)
    }

    /// The variables to set on a subprocess.
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Get the number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if the overlay is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// One line per variable, with secret values left out.
    pub fn describe(&self) -> Vec<String> {
        self.vars
            .iter()
            .map(|(key, value)| {
                let source = self
                    .source_of(key)
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                if self.is_secret(key) {
                    format!("{} ({})", key, source)
                } else {
                    format!("{}={:?} ({})", key, value, source)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variables() -> PackageVariables {
        PackageVariables {
            env: vec![
                Variable::new("PROJECT_ID", "my-project", VariableSource::AutomaticVar),
                Variable::new("SHARED", "from-env", VariableSource::DefaultValue),
            ],
            secrets: vec![
                Variable::new("API_KEY", "hunter2", VariableSource::CiSetupFile),
                Variable::new("SHARED", "from-secret", VariableSource::CiSetupFile),
            ],
        }
    }

    #[test]
    fn project_alias_is_added() {
        let overlay = EnvOverlay::from_variables(&variables());
        assert_eq!(overlay.get(GOOGLE_SAMPLES_PROJECT), Some("my-project"));
        assert_eq!(
            overlay.source_of(GOOGLE_SAMPLES_PROJECT),
            Some(VariableSource::AutomaticVar)
        );
    }

    #[test]
    fn secrets_win_on_conflict() {
        let overlay = EnvOverlay::from_variables(&variables());
        assert_eq!(overlay.get("SHARED"), Some("from-secret"));
        assert!(overlay.is_secret("SHARED"));
    }

    #[test]
    fn describe_hides_secret_values() {
        let overlay = EnvOverlay::from_variables(&variables());
        let lines = overlay.describe();
        assert!(lines.contains(&"API_KEY (ci-setup file)".to_string()));
        assert!(lines.contains(&"PROJECT_ID=\"my-project\" (automatic)".to_string()));
        assert!(lines.iter().all(|l| !l.contains("hunter2")));
    }

    #[test]
    fn plain_set_clears_secret_flag() {
        let mut overlay = EnvOverlay::new();
        overlay.set_secret("K", "v", VariableSource::CiSetupFile);
        overlay.set("K", "w", VariableSource::UserDefined);
        assert!(!overlay.is_secret("K"));
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn empty_overlay() {
        let overlay = EnvOverlay::new();
        assert!(overlay.is_empty());
        assert_eq!(overlay.get("ANYTHING"), None);
    }
}
