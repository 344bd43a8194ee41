//! Path pattern matching for `match` and `ignore`.
//!
//! A path matches a pattern if any of these rules succeeds, tried in order:
//!
//! 1. The pattern equals the full path.
//! 2. The pattern equals the path's file name.
//! 3. The pattern, read as a glob, matches a component-aligned suffix of the path.
//!    `**` matches anything, `*` matches anything but `/`, `.` is literal.
//! 4. The pattern, read as a raw regex, matches a component-aligned suffix of the path.
//!
//! Paths use `/` as the separator.

use crate::config::Config;
use regex::Regex;

/// A single compiled pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    glob: Option<Regex>,
    regex: Option<Regex>,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// Patterns that are not valid as a glob or regex still match by their
    /// exact text.
    pub fn new(raw: &str) -> Self {
        let glob = compile_anchored(&glob_to_regex(raw), raw);
        let regex = compile_anchored(raw, raw);
        Self {
            raw: raw.to_string(),
            glob,
            regex,
        }
    }

    /// Get the pattern text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check whether `path` matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        if path == self.raw || file_name(path) == self.raw {
            return true;
        }
        if self.glob.as_ref().is_some_and(|re| re.is_match(path)) {
            return true;
        }
        self.regex.as_ref().is_some_and(|re| re.is_match(path))
    }
}

/// An ordered set of patterns; matches if any pattern matches.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compile every pattern in the list.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| Pattern::new(p.as_ref())).collect(),
        }
    }

    /// Check whether any pattern matches `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    /// Check if the set has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// The config's `match` and `ignore` patterns, compiled once.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: PatternSet,
    exclude: PatternSet,
}

impl PathFilter {
    /// Compile the filter for a config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            include: PatternSet::new(&config.match_patterns),
            exclude: PatternSet::new(&config.ignore_patterns),
        }
    }

    /// A path passes if it matches `match` and does not match `ignore`.
    pub fn matches(&self, path: &str) -> bool {
        self.include.matches(path) && !self.exclude.matches(path)
    }
}

/// Check whether `path` matches any of `patterns`.
pub fn matches<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    PatternSet::new(patterns).matches(path)
}

/// Check whether `path` passes the config's `match` and `ignore` patterns.
pub fn file_matches_config(config: &Config, path: &str) -> bool {
    PathFilter::from_config(config).matches(path)
}

/// Translate a glob into an (unanchored) regex body.
///
/// Only `**`, `*` and `.` are translated. Every other character is regex
/// passthrough, so `?`, `+`, `(...)` and `[...]` keep their regex meaning:
/// `v[0-9]+/*.txt` matches `v12/notes.txt`.
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2);
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str(".*");
            }
            '*' => out.push_str("[^/]*"),
            '.' => out.push_str(r"\."),
            c => out.push(c),
        }
    }
    out
}

/// Anchor a regex body so it must match from the start of the path or right
/// after a `/`, through to the end.
fn compile_anchored(body: &str, raw: &str) -> Option<Regex> {
    match Regex::new(&format!("(?:^|/)(?:{})$", body)) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::debug!(pattern = raw, error = %e, "pattern is not a valid regex");
            None
        }
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
