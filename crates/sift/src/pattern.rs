//! Compiled string patterns for `LIKE` and `MATCHES`.

use std::fmt;

use regex::Regex;

use crate::error::Result;
use crate::observability::log_warn;

/// A compiled string pattern.
///
/// Built either from a glob ([`Pattern::like`]) or from a regular expression
/// ([`Pattern::regex`]). The source text is kept for canonical rendering.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Option<Regex>,
}

impl Pattern {
    /// Compiles a glob where `*` matches any run of characters and `?`
    /// matches exactly one. The whole subject must match, case-sensitively.
    ///
    /// ```
    /// use sift::Pattern;
    ///
    /// let pattern = Pattern::like("Ed*").unwrap();
    /// assert!(pattern.is_match("Eden"));
    /// assert!(!pattern.is_match("eden"));
    /// assert!(!pattern.is_match("Fred"));
    /// ```
    pub fn like(glob: &str) -> Result<Self> {
        let regex = Regex::new(&glob_to_regex(glob))?;
        Ok(Pattern {
            source: glob.to_string(),
            regex: Some(regex),
        })
    }

    /// Compiles a regular expression. Matching searches anywhere in the
    /// subject; anchor with `^`/`$` to match the whole string.
    pub fn regex(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(Pattern {
            source: pattern.to_string(),
            regex: Some(regex),
        })
    }

    /// Like [`Pattern::like`], but a glob that fails to compile yields a
    /// pattern that never matches.
    pub(crate) fn like_or_never(glob: &str) -> Self {
        match Pattern::like(glob) {
            Ok(pattern) => pattern,
            Err(err) => {
                log_warn!(event = "like_pattern_invalid", pattern = glob, error = %err);
                Pattern {
                    source: glob.to_string(),
                    regex: None,
                }
            }
        }
    }

    /// Returns the pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if `subject` matches.
    pub fn is_match(&self, subject: &str) -> bool {
        self.regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(subject))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push_str("(?s)^");

    let mut literal = String::new();
    for c in glob.chars() {
        let wildcard = match c {
            '*' => ".*",
            '?' => ".",
            _ => {
                literal.push(c);
                continue;
            }
        };
        out.push_str(&regex::escape(&literal));
        literal.clear();
        out.push_str(wildcard);
    }
    out.push_str(&regex::escape(&literal));

    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_translation() {
        assert_eq!(glob_to_regex("Ed*"), "(?s)^Ed.*$");
        assert_eq!(glob_to_regex("a?c"), "(?s)^a.c$");
        assert_eq!(glob_to_regex("1.5*"), r"(?s)^1\.5.*$");
    }

    #[test]
    fn like_is_anchored() {
        let pattern = Pattern::like("*den").unwrap();
        assert!(pattern.is_match("Eden"));
        assert!(pattern.is_match("den"));
        assert!(!pattern.is_match("Edens"));
    }

    #[test]
    fn like_escapes_metacharacters() {
        let pattern = Pattern::like("a+b*").unwrap();
        assert!(pattern.is_match("a+bc"));
        assert!(!pattern.is_match("aab"));
    }

    #[test]
    fn like_single_char_wildcard() {
        let pattern = Pattern::like("B?b").unwrap();
        assert!(pattern.is_match("Bob"));
        assert!(!pattern.is_match("Boob"));
    }

    #[test]
    fn regex_searches_unanchored() {
        let pattern = Pattern::regex(r"\d+").unwrap();
        assert!(pattern.is_match("task 42"));
        assert!(!pattern.is_match("task"));
        assert_eq!(pattern.as_str(), r"\d+");
    }

    #[test]
    fn invalid_regex_is_an_error() {
        assert!(Pattern::regex("(unclosed").is_err());
    }
}
