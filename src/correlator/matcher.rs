use std::fmt;

use regex::Regex;

use crate::{RendezError, Result};

/// Predicate over the absolute request URL of an observed response.
#[derive(Debug, Clone)]
pub enum UrlMatcher {
    /// Substring containment, the common case
    Contains(String),
    /// Compiled regular expression for the rare call that needs one
    Pattern(Regex),
}

impl UrlMatcher {
    /// Substring matcher. The fragment must be non-empty, otherwise every
    /// response on the page would satisfy it.
    pub fn contains(fragment: &str) -> Result<Self> {
        if fragment.trim().is_empty() {
            return Err(RendezError::InvalidMatcher(
                "URL substring must be non-empty".to_string(),
            ));
        }
        Ok(Self::Contains(fragment.to_string()))
    }

    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Contains(fragment) => url.contains(fragment.as_str()),
            Self::Pattern(re) => re.is_match(url),
        }
    }
}

impl fmt::Display for UrlMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains(fragment) => write!(f, "url contains \"{}\"", fragment),
            Self::Pattern(re) => write!(f, "url matches /{}/", re.as_str()),
        }
    }
}

/// Set of acceptable HTTP status codes for a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMatcher {
    codes: Vec<u16>,
}

impl StatusMatcher {
    /// The common case: `{200}`
    pub fn ok() -> Self {
        Self { codes: vec![200] }
    }

    pub fn of(codes: impl IntoIterator<Item = u16>) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    /// Accept any status. Used when the test asserts on the code itself.
    pub fn any() -> Self {
        Self { codes: Vec::new() }
    }

    pub fn matches(&self, code: u16) -> bool {
        self.codes.is_empty() || self.codes.contains(&code)
    }
}

impl Default for StatusMatcher {
    fn default() -> Self {
        Self::ok()
    }
}

impl fmt::Display for StatusMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.codes.is_empty() {
            write!(f, "status any")
        } else {
            let codes: Vec<String> = self.codes.iter().map(|c| c.to_string()).collect();
            write!(f, "status in {{{}}}", codes.join(", "))
        }
    }
}
