//! Running a configured command over packages.
//!
//! A command has three phases, run strictly in sequence:
//!
//! 1. `pre` steps at the checkout root. Any failure aborts the invocation.
//! 2. `run` steps in each package directory, with the package's variables.
//!    Every package is attempted. Within a package the first failing step
//!    stops that package.
//! 3. `post` steps at the checkout root. Any failure aborts the invocation.
//!
//! Package failures are collected and reported together at the end.

use crate::config::{load_ci_setup, CommandConfig, Config};
use crate::error::{CustardError, Result};
use crate::runner::overlay::EnvOverlay;
use crate::shell::{execute, CommandOptions};
use crate::ui::UserInterface;
use crate::variables::VariableResolver;
use std::path::Path;
use std::time::{Duration, Instant};

/// The outcome of one package's `run` steps.
#[derive(Debug, Clone)]
pub struct PackageResult {
    pub package: String,
    pub success: bool,
    pub duration: Duration,
}

/// The outcome of a whole invocation in which `pre` and `post` succeeded.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub packages: Vec<PackageResult>,
}

impl RunSummary {
    /// Packages whose steps all succeeded.
    pub fn passed(&self) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| p.success)
            .map(|p| p.package.as_str())
            .collect()
    }

    /// Packages with a failed step.
    pub fn failed(&self) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| !p.success)
            .map(|p| p.package.as_str())
            .collect()
    }

    /// Check whether every package passed.
    pub fn success(&self) -> bool {
        self.packages.iter().all(|p| p.success)
    }
}

/// Executes configured commands over packages.
pub struct CommandRunner<'a> {
    config: &'a Config,
    root: &'a Path,
    resolver: &'a VariableResolver<'a>,
}

impl<'a> CommandRunner<'a> {
    /// Create a runner for a checkout.
    pub fn new(config: &'a Config, root: &'a Path, resolver: &'a VariableResolver<'a>) -> Self {
        Self {
            config,
            root,
            resolver,
        }
    }

    /// Look up a command by name.
    pub fn command(&self, name: &str) -> Result<&'a CommandConfig> {
        self.config
            .commands
            .get(name)
            .ok_or_else(|| CustardError::UnknownCommand {
                name: name.to_string(),
                available: self
                    .config
                    .commands
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Run the named command over `packages`.
    ///
    /// # Errors
    ///
    /// Returns `PhaseFailed` if a `pre` or `post` step fails, or
    /// `PackagesFailed` listing every package with a failed `run` step.
    pub fn run(
        &self,
        name: &str,
        packages: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<RunSummary> {
        let command = self.command(name)?;

        self.run_phase("pre", command.pre.as_deref(), ui)?;

        let mut summary = RunSummary::default();
        if let Some(steps) = command.run.as_deref() {
            for package in packages {
                summary.packages.push(self.run_package(package, steps, ui));
            }
        }

        self.run_phase("post", command.post.as_deref(), ui)?;

        let failed = summary.failed();
        if summary.packages.len() > 1 {
            let message = format!(
                "{} passed, {} failed",
                summary.packages.len() - failed.len(),
                failed.len()
            );
            if failed.is_empty() {
                ui.success(&message);
            } else {
                ui.error(&message);
            }
        }

        if !failed.is_empty() {
            return Err(CustardError::PackagesFailed {
                failed: failed.into_iter().map(String::from).collect(),
            });
        }
        Ok(summary)
    }

    fn run_phase(
        &self,
        phase: &str,
        steps: Option<&[String]>,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let Some(steps) = steps else {
            return Ok(());
        };

        let options = CommandOptions {
            cwd: Some(self.root.to_path_buf()),
            ..Default::default()
        };
        for step in steps {
            ui.info(&format!("[{}] {}", phase, step));
            let result = execute(step, &options).map_err(|e| phase_error(phase, step, e))?;
            if !result.success {
                return Err(CustardError::PhaseFailed {
                    phase: phase.to_string(),
                    command: step.clone(),
                    code: result.exit_code,
                });
            }
        }
        Ok(())
    }

    fn run_package(
        &self,
        package: &str,
        steps: &[String],
        ui: &mut dyn UserInterface,
    ) -> PackageResult {
        let start = Instant::now();
        ui.info(&format!("Running in package {:?}", package));

        let success = match self.try_run_package(package, steps, ui) {
            Ok(()) => {
                ui.success(&format!("{} passed", package));
                true
            }
            Err(e) => {
                ui.error(&format!("{} failed: {}", package, e));
                false
            }
        };

        PackageResult {
            package: package.to_string(),
            success,
            duration: start.elapsed(),
        }
    }

    fn try_run_package(
        &self,
        package: &str,
        steps: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let dir = self.root.join(package);
        let setup = load_ci_setup(self.config, &dir)?;
        let variables = self
            .resolver
            .resolve(&setup, &self.config.ci_setup_defaults)?;
        let overlay = EnvOverlay::from_variables(&variables);
        for line in overlay.describe() {
            ui.debug(&line);
        }

        let options = CommandOptions::in_dir(&dir, overlay.vars().clone());
        for step in steps {
            ui.info(&format!("[{}] {}", package, step));
            let result = execute(step, &options)?;
            if !result.success {
                return Err(CustardError::CommandFailed {
                    command: step.clone(),
                    code: result.exit_code,
                });
            }
        }
        Ok(())
    }
}

fn phase_error(phase: &str, step: &str, error: CustardError) -> CustardError {
    match error {
        CustardError::CommandFailed { code, .. } => CustardError::PhaseFailed {
            phase: phase.to_string(),
            command: step.to_string(),
            code,
        },
        other => other,
    }
}
