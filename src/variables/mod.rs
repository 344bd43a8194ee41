//! Variable resolution for package runs.
//!
//! - [`resolver`] - the four-source precedence rule
//! - [`interpolation`] - `$VAR` / `${VAR}` substitution
//! - [`env`] - environment and secret variables of a package
//! - [`providers`] - project, secret, and identity-token backends

pub mod env;
pub mod interpolation;
pub mod providers;
pub mod resolver;

pub use env::{
    list_env, list_secrets, process_env, PackageVariables, VariableResolver, ID_TOKEN,
    PROJECT_ID, RUN_ID, SERVICE_ACCOUNT,
};
pub use interpolation::{substitute, SubstitutionTable};
pub use providers::{
    parse_secret_reference, GcloudProviders, IdTokenProvider, ProjectProvider, Providers,
    SecretStore,
};
pub use resolver::{list_variables, EnvSnapshot, Generator, Generators, Variable, VariableSource};
