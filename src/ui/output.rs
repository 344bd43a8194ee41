//! Diagnostic verbosity levels.

use std::fmt;
use std::str::FromStr;

/// Minimum level of diagnostics to show.
///
/// Levels are ordered: each one suppresses everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Show everything, including resolution details.
    Debug,
    /// Show progress and status.
    #[default]
    Info,
    /// Show warnings and errors only.
    Warn,
    /// Show errors only.
    Error,
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!(
                "unknown verbosity '{}': expected one of debug, info, warn, error",
                s
            )),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

impl Verbosity {
    /// Check if a message at `level` passes this minimum.
    pub fn shows(&self, level: Verbosity) -> bool {
        level >= *self
    }

    /// The `tracing` filter directive matching this level.
    pub fn tracing_directive(&self) -> String {
        format!("custard={}", self)
    }
}
