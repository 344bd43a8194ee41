//! `$VAR` and `${VAR}` substitution between resolved variables.
//!
//! # Syntax
//!
//! - `$NAME` - replaced when `NAME` is not followed by another word character
//! - `${NAME}` or `${ NAME }` - replaced regardless of what follows
//!
//! References are substituted recursively, so `X=$Y` and `Y=value` make `$X`
//! resolve to `value`. A reference cycle is an error. References to names
//! outside the table are left verbatim.

use crate::error::{CustardError, Result};
use regex::{NoExpand, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:([A-Za-z_][A-Za-z0-9_]*)|\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\})").unwrap()
});

#[derive(Debug)]
struct Entry {
    value: String,
    pattern: Regex,
}

/// Variables available for substitution, with one compiled pattern per key.
#[derive(Debug, Default)]
pub struct SubstitutionTable {
    entries: BTreeMap<String, Entry>,
}

impl SubstitutionTable {
    /// Build a table from key/value pairs.
    pub fn new<I, K, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = BTreeMap::new();
        for (key, value) in values {
            let key = key.into();
            let pattern = reference_pattern(&key)?;
            entries.insert(
                key,
                Entry {
                    value: value.into(),
                    pattern,
                },
            );
        }
        Ok(Self { entries })
    }

    /// Check if a key is in the table.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Substitute every known reference in `text`.
    ///
    /// # Errors
    ///
    /// Returns `CircularReference` if the references form a cycle.
    pub fn substitute(&self, text: &str) -> Result<String> {
        let result = self.substitute_inner(text, &mut Vec::new())?;
        for name in unresolved_references(&result) {
            if !self.contains(name) {
                tracing::debug!(reference = name, "unresolved variable reference left as is");
            }
        }
        Ok(result)
    }

    fn substitute_inner(&self, text: &str, stack: &mut Vec<String>) -> Result<String> {
        let mut out = text.to_string();
        for (key, entry) in &self.entries {
            if !entry.pattern.is_match(&out) {
                continue;
            }
            if stack.contains(key) {
                let mut chain = stack.clone();
                chain.push(key.clone());
                return Err(CustardError::CircularReference {
                    chain: chain.join(" -> "),
                });
            }

            stack.push(key.clone());
            let resolved = self.substitute_inner(&entry.value, stack)?;
            stack.pop();

            out = entry
                .pattern
                .replace_all(&out, NoExpand(&resolved))
                .into_owned();
        }
        Ok(out)
    }
}

fn reference_pattern(key: &str) -> Result<Regex> {
    let key = regex::escape(key);
    Regex::new(&format!(r"\$(?:{key}\b|\{{\s*{key}\s*\}})"))
        .map_err(|e| CustardError::Other(anyhow::Error::from(e)))
}

fn unresolved_references(text: &str) -> impl Iterator<Item = &str> {
    REFERENCE.captures_iter(text).filter_map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|name| name.as_str())
    })
}

/// Substitute references in `text` using `values`.
pub fn substitute(values: &BTreeMap<String, String>, text: &str) -> Result<String> {
    SubstitutionTable::new(values.iter().map(|(k, v)| (k.as_str(), v.as_str())))?.substitute(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> SubstitutionTable {
        SubstitutionTable::new(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn dollar_reference() {
        assert_eq!(table(&[("VAR", "b")]).substitute("a-$VAR-c").unwrap(), "a-b-c");
    }

    #[test]
    fn dollar_reference_respects_word_boundary() {
        assert_eq!(
            table(&[("VAR", "b")]).substitute("a-$VARs-c").unwrap(),
            "a-$VARs-c"
        );
    }

    #[test]
    fn braced_reference() {
        assert_eq!(
            table(&[("VAR", "b")]).substitute("a-${VAR}s-c").unwrap(),
            "a-bs-c"
        );
    }

    #[test]
    fn braced_reference_tolerates_whitespace() {
        assert_eq!(
            table(&[("VAR", "b")]).substitute("a-${ VAR }-c").unwrap(),
            "a-b-c"
        );
    }

    #[test]
    fn chained_references() {
        let t = table(&[("X", "$Y"), ("Y", "val")]);
        assert_eq!(t.substitute("$X").unwrap(), "val");
    }

    #[test]
    fn deep_chain() {
        let t = table(&[("A", "${B}/a"), ("B", "$C/b"), ("C", "c")]);
        assert_eq!(t.substitute("$A").unwrap(), "c/b/a");
    }

    #[test]
    fn unknown_reference_is_left_verbatim() {
        let t = table(&[("VAR", "b")]);
        assert_eq!(t.substitute("$UNKNOWN-$VAR").unwrap(), "$UNKNOWN-b");
    }

    #[test]
    fn repeated_reference() {
        let t = table(&[("VAR", "b")]);
        assert_eq!(t.substitute("$VAR$VAR ${VAR}").unwrap(), "bb b");
    }

    #[test]
    fn replacement_is_literal() {
        let t = table(&[("VAR", "$1 and ${2}")]);
        assert_eq!(t.substitute("[$VAR]").unwrap(), "[$1 and ${2}]");
    }

    #[test]
    fn cycle_is_an_error() {
        let t = table(&[("X", "$Y"), ("Y", "$X")]);
        match t.substitute("$X") {
            Err(CustardError::CircularReference { chain }) => {
                assert_eq!(chain, "X -> Y -> X");
            }
            other => panic!("expected cycle error, got {:?}", other),
        }
    }

    #[test]
    fn self_reference_is_an_error() {
        let t = table(&[("X", "${X}x")]);
        assert!(matches!(
            t.substitute("$X"),
            Err(CustardError::CircularReference { .. })
        ));
    }

    #[test]
    fn text_without_references_is_unchanged() {
        let t = table(&[("X", "1")]);
        assert_eq!(t.substitute("plain text").unwrap(), "plain text");
    }

    #[test]
    fn substitute_from_map() {
        let values = BTreeMap::from([("NAME".to_string(), "world".to_string())]);
        assert_eq!(substitute(&values, "hello $NAME").unwrap(), "hello world");
    }
}
