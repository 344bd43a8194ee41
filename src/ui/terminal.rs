//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, CustardTheme, UserInterface, Verbosity};

/// Terminal UI implementation.
///
/// Diagnostics go to stderr so that stdout only carries results and can be
/// piped into other tools.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: CustardTheme,
    verbosity: Verbosity,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(verbosity: Verbosity) -> Self {
        let theme = if should_use_colors() {
            CustardTheme::new()
        } else {
            CustardTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            verbosity,
        }
    }

    fn diagnostic(&mut self, level: Verbosity, line: String) {
        if self.verbosity.shows(level) {
            writeln!(self.err, "{}", line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn debug(&mut self, msg: &str) {
        let line = self.theme.format_debug(msg);
        self.diagnostic(Verbosity::Debug, line);
    }

    fn info(&mut self, msg: &str) {
        let line = self.theme.format_info(msg);
        self.diagnostic(Verbosity::Info, line);
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.diagnostic(Verbosity::Info, line);
    }

    fn warning(&mut self, msg: &str) {
        let line = self.theme.format_warning(msg);
        self.diagnostic(Verbosity::Warn, line);
    }

    fn error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.diagnostic(Verbosity::Error, line);
    }

    fn result(&mut self, line: &str) {
        writeln!(self.out, "{}", line).ok();
    }
}
