//! Diagnostic output.
//!
//! This module provides:
//! - [`UserInterface`] trait, the injected logging capability every component reports through
//! - [`Verbosity`] levels that select which diagnostics are shown
//! - [`TerminalUI`] for real runs (diagnostics on stderr, results on stdout)
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use custard::ui::{MockUI, UserInterface, Verbosity};
//!
//! let mut ui = MockUI::with_verbosity(Verbosity::Warn);
//! ui.info("hidden at warn level");
//! ui.warning("shown");
//! assert!(ui.infos().is_empty());
//! assert_eq!(ui.warnings(), ["shown".to_string()]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::Verbosity;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, CustardTheme};

/// Trait for reporting diagnostics and results.
///
/// Diagnostics are filtered by the implementation's [`Verbosity`];
/// results are machine-readable output and are never filtered.
pub trait UserInterface {
    /// Get the configured minimum level.
    fn verbosity(&self) -> Verbosity;

    /// Report a detail useful when debugging a run.
    fn debug(&mut self, msg: &str);

    /// Report progress or status.
    fn info(&mut self, msg: &str);

    /// Report a success.
    fn success(&mut self, msg: &str);

    /// Report a recoverable problem.
    fn warning(&mut self, msg: &str);

    /// Report a failure.
    fn error(&mut self, msg: &str);

    /// Emit one line of command output (e.g. an affected package path).
    fn result(&mut self, line: &str);
}
