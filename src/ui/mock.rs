//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures every
//! diagnostic that passes its verbosity filter for later assertion.

use super::{UserInterface, Verbosity};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    verbosity: Verbosity,
    debugs: Vec<String>,
    infos: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    results: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI that records everything.
    pub fn new() -> Self {
        Self::with_verbosity(Verbosity::Debug)
    }

    /// Create a new MockUI with a specific minimum level.
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            ..Default::default()
        }
    }

    /// Get all captured debug messages.
    pub fn debugs(&self) -> &[String] {
        &self.debugs
    }

    /// Get all captured info messages.
    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all result lines.
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Every captured diagnostic, in no particular order.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &String> {
        self.debugs
            .iter()
            .chain(&self.infos)
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
    }
}

impl UserInterface for MockUI {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn debug(&mut self, msg: &str) {
        if self.verbosity.shows(Verbosity::Debug) {
            self.debugs.push(msg.to_string());
        }
    }

    fn info(&mut self, msg: &str) {
        if self.verbosity.shows(Verbosity::Info) {
            self.infos.push(msg.to_string());
        }
    }

    fn success(&mut self, msg: &str) {
        if self.verbosity.shows(Verbosity::Info) {
            self.successes.push(msg.to_string());
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.verbosity.shows(Verbosity::Warn) {
            self.warnings.push(msg.to_string());
        }
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn result(&mut self, line: &str) {
        self.results.push(line.to_string());
    }
}
