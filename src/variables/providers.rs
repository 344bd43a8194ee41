//! Backends for project, secret, and identity-token lookups.
//!
//! The resolver only depends on the traits. [`GcloudProviders`] implements
//! all three by shelling out to the `gcloud` CLI.

use crate::error::{CustardError, Result};
use crate::shell::{execute, CommandOptions};

/// Looks up the ambient default project.
pub trait ProjectProvider {
    fn default_project(&self) -> Result<String>;
}

/// Resolves a secret reference such as `project/secret-name` to its value.
pub trait SecretStore {
    fn access(&self, reference: &str) -> Result<String>;
}

/// Mints an identity token for a project.
pub trait IdTokenProvider {
    fn id_token(&self, project_id: &str) -> Result<String>;
}

/// Everything the variable resolver needs from the outside world.
pub trait Providers: ProjectProvider + SecretStore + IdTokenProvider {}

impl<T: ProjectProvider + SecretStore + IdTokenProvider> Providers for T {}

/// Providers backed by the `gcloud` CLI.
#[derive(Debug, Clone)]
pub struct GcloudProviders {
    program: String,
}

impl Default for GcloudProviders {
    fn default() -> Self {
        Self::new("gcloud")
    }
}

impl GcloudProviders {
    /// Use a specific `gcloud` executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `gcloud` and return its stdout untouched.
    fn run(&self, provider: &str, key: &str, args: &str) -> Result<String> {
        let command = format!("{} {}", self.program, args);
        let options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };
        let result = execute(&command, &options).map_err(|e| provider_error(provider, key, e))?;
        if !result.success {
            return Err(CustardError::Provider {
                provider: provider.to_string(),
                key: key.to_string(),
                message: format!(
                    "exit code {:?}: {}",
                    result.exit_code,
                    result.stderr.trim()
                ),
            });
        }
        Ok(result.stdout)
    }
}

fn provider_error(provider: &str, key: &str, error: CustardError) -> CustardError {
    CustardError::Provider {
        provider: provider.to_string(),
        key: key.to_string(),
        message: error.to_string(),
    }
}

/// Split a `project/secret-name` reference.
pub fn parse_secret_reference(reference: &str) -> Result<(&str, &str)> {
    match reference.split_once('/') {
        Some((project, name)) if is_identifier(project) && is_identifier(name) => {
            Ok((project, name))
        }
        _ => Err(CustardError::Provider {
            provider: "secret store".to_string(),
            key: reference.to_string(),
            message: "expected a reference of the form 'project/secret-name'".to_string(),
        }),
    }
}

// Both halves end up on a shell command line.
fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

impl ProjectProvider for GcloudProviders {
    fn default_project(&self) -> Result<String> {
        self.run("project provider", "PROJECT_ID", "config get-value project --quiet")
            .map(|out| out.trim().to_string())
    }
}

impl SecretStore for GcloudProviders {
    /// Secret payloads are returned byte for byte, trailing newlines included.
    fn access(&self, reference: &str) -> Result<String> {
        let (project, name) = parse_secret_reference(reference)?;
        self.run(
            "secret store",
            reference,
            &format!(
                "secrets versions access latest --secret='{}' --project='{}' --quiet",
                name, project
            ),
        )
    }
}

impl IdTokenProvider for GcloudProviders {
    fn id_token(&self, project_id: &str) -> Result<String> {
        self.run(
            "identity token provider",
            project_id,
            "auth print-identity-token --quiet",
        )
        .map(|out| out.trim().to_string())
    }
}
