//! Stateless text predicates used by the rule evaluators.

use regex::Regex;

/// Whole-token issue reference: `#42` or `owner/repo#42`.
const ISSUE_REFERENCE_PATTERN: &str = r"^(?:\S+/\S+)?#\d+$";

/// URL detector covering scheme-prefixed, `www`-prefixed, and bare-domain
/// forms. Parenthesised path segments are kept together so wiki-style links
/// survive tokenisation.
const URL_PATTERN: &str = r"(?i)(?:(?:https?|ftp)://|www\.)(?:\([^\s()]*\)|[^\s()])+|(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(?:/(?:\([^\s()]*\)|[^\s()])*)?";

/// Compiled token patterns shared by the body sub-checks.
#[derive(Debug, Clone)]
pub struct SpecPatterns {
    issue_reference: Regex,
    url: Regex,
}

impl SpecPatterns {
    /// Compiles the built-in patterns.
    ///
    /// # Errors
    ///
    /// Returns the compiler diagnostic if a pattern is rejected.
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            issue_reference: Regex::new(ISSUE_REFERENCE_PATTERN)?,
            url: Regex::new(URL_PATTERN)?,
        })
    }

    /// True when any whitespace-separated token of `text` is an issue
    /// reference.
    #[must_use]
    pub fn contains_issue_reference(&self, text: &str) -> bool {
        text.split_whitespace()
            .any(|token| self.issue_reference.is_match(token))
    }

    /// True when any whitespace-separated token of `text` contains a URL.
    #[must_use]
    pub fn contains_url(&self, text: &str) -> bool {
        text.split_whitespace()
            .any(|token| self.url.is_match(token))
    }
}

/// True when `text` has strictly more characters than `length`.
#[must_use]
pub fn exceeds_length(text: &str, length: usize) -> bool {
    text.chars().count() > length
}
