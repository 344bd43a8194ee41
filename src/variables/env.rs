//! Environment and secret variables for a package.
//!
//! Both use the same precedence (see [`list_variables`]) over the `env` or
//! `secrets` mapping of the ci-setup file and defaults.
//!
//! Environment variables are interpolated against each other after
//! resolution. Secrets never are: a ci-setup secret is a reference such as
//! `project/secret-name` that is resolved through the [`SecretStore`], while
//! user defined and default secret values are used as they are.

use crate::config::{string_map, CiSetup, ENV_FIELD, SECRETS_FIELD};
use crate::error::Result;
use crate::variables::interpolation::SubstitutionTable;
use crate::variables::providers::{IdTokenProvider, ProjectProvider, Providers, SecretStore};
use crate::variables::resolver::{
    list_variables, EnvSnapshot, Generators, Variable, VariableSource,
};

/// Automatic: the ambient default project.
pub const PROJECT_ID: &str = "PROJECT_ID";
/// Automatic: a fresh random identifier per package run.
pub const RUN_ID: &str = "RUN_ID";
/// Automatic: always empty unless overridden.
pub const SERVICE_ACCOUNT: &str = "SERVICE_ACCOUNT";
/// Automatic secret: an identity token for `PROJECT_ID`.
pub const ID_TOKEN: &str = "ID_TOKEN";

/// Snapshot the current process environment.
///
/// Variables whose name or value is not valid unicode are skipped.
pub fn process_env() -> EnvSnapshot {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Resolve and interpolate environment variables.
pub fn list_env<P>(
    env: &EnvSnapshot,
    setup: &CiSetup,
    defaults: &CiSetup,
    projects: &P,
) -> Result<Vec<Variable>>
where
    P: ProjectProvider + ?Sized,
{
    let mut automatic = Generators::new();
    automatic.insert(
        PROJECT_ID.to_string(),
        Box::new(|| projects.default_project()),
    );
    automatic.insert(
        RUN_ID.to_string(),
        Box::new(|| Ok(uuid::Uuid::new_v4().simple().to_string())),
    );
    automatic.insert(SERVICE_ACCOUNT.to_string(), Box::new(|| Ok(String::new())));

    let variables = list_variables(
        env,
        &string_map(setup, ENV_FIELD),
        &string_map(defaults, ENV_FIELD),
        &automatic,
        |value| Ok(value.to_string()),
    )?;

    let table = SubstitutionTable::new(
        variables
            .iter()
            .map(|v| (v.key.as_str(), v.value.as_str())),
    )?;
    variables
        .into_iter()
        .map(|mut variable| {
            variable.value = table.substitute(&variable.value)?;
            Ok(variable)
        })
        .collect()
}

/// Resolve secret variables.
///
/// Only values from the ci-setup file go through `store`. `ID_TOKEN` is
/// minted for `project_id` when nothing else provides it.
pub fn list_secrets<S, T>(
    env: &EnvSnapshot,
    setup: &CiSetup,
    defaults: &CiSetup,
    project_id: &str,
    store: &S,
    tokens: &T,
) -> Result<Vec<Variable>>
where
    S: SecretStore + ?Sized,
    T: IdTokenProvider + ?Sized,
{
    let mut automatic = Generators::new();
    automatic.insert(
        ID_TOKEN.to_string(),
        Box::new(|| tokens.id_token(project_id)),
    );

    let variables = list_variables(
        env,
        &string_map(setup, SECRETS_FIELD),
        &string_map(defaults, SECRETS_FIELD),
        &automatic,
        |value| Ok(value.to_string()),
    )?;

    variables
        .into_iter()
        .map(|mut variable| {
            if variable.source == VariableSource::CiSetupFile {
                variable.value = store.access(&variable.value)?;
            }
            Ok(variable)
        })
        .collect()
}

/// The resolved variables of one package.
#[derive(Debug, Clone, Default)]
pub struct PackageVariables {
    pub env: Vec<Variable>,
    pub secrets: Vec<Variable>,
}

impl PackageVariables {
    /// Look up a resolved environment variable.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|v| v.key == key)
            .map(|v| v.value.as_str())
    }
}

/// Resolves package variables against a fixed environment snapshot.
pub struct VariableResolver<'a> {
    env: EnvSnapshot,
    providers: &'a dyn Providers,
}

impl<'a> VariableResolver<'a> {
    pub fn new(env: EnvSnapshot, providers: &'a dyn Providers) -> Self {
        Self { env, providers }
    }

    /// The environment snapshot user defined values come from.
    pub fn snapshot(&self) -> &EnvSnapshot {
        &self.env
    }

    /// Resolve a package's environment and secrets.
    ///
    /// `setup` holds only the ci-setup file's values; `defaults` is the
    /// config's `ci-setup-defaults`.
    pub fn resolve(&self, setup: &CiSetup, defaults: &CiSetup) -> Result<PackageVariables> {
        let env = list_env(&self.env, setup, defaults, self.providers)?;
        let project_id = env
            .iter()
            .find(|v| v.key == PROJECT_ID)
            .map(|v| v.value.clone())
            .unwrap_or_default();
        let secrets = list_secrets(
            &self.env,
            setup,
            defaults,
            &project_id,
            self.providers,
            self.providers,
        )?;
        Ok(PackageVariables { env, secrets })
    }
}
