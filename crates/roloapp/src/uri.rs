//! Phonebook locators of the form `[scheme://]location`.
//!
//! The scheme names the backend used to open the location. A URI without a
//! scheme is "relative"; [`Uri::absolutize`] fills the scheme in by asking
//! a resolver to probe its backends.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, RoloError};
use crate::resolver::Resolver;

// Permissive by construction: any string without a scheme prefix is a bare
// location. The location may itself contain further "://" sequences.
static URI_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(?:(?P<scheme>\w+)://)?(?P<location>.*)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    scheme: Option<String>,
    location: String,
}

impl Uri {
    /// Parse `raw` into scheme and location.
    pub fn parse(raw: &str) -> Result<Self> {
        let captures = URI_PATTERN
            .captures(raw)
            .ok_or_else(|| RoloError::InvalidUri(raw.to_string()))?;
        Ok(Self {
            scheme: captures.name("scheme").map(|m| m.as_str().to_string()),
            location: captures
                .name("location")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    /// Build an absolute URI from parts.
    pub fn with_scheme(scheme: &str, location: &str) -> Self {
        Self {
            scheme: Some(scheme.to_string()),
            location: location.to_string(),
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Fill the scheme by probing `resolver`'s backends against the
    /// location. Leaves the scheme untouched when already set, and `None`
    /// when no backend matches (the caller handles the unresolved case).
    pub fn absolutize(&mut self, resolver: &Resolver) {
        if self.is_absolute() {
            return;
        }
        if let Some(backend) = resolver.backend_for_location(&self.location) {
            self.scheme = Some(backend.name().to_string());
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "{}://{}", scheme, self.location),
            None => write!(f, "{}", self.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_uri() {
        let uri = Uri::parse("csv:///tmp/book.csv").unwrap();
        assert_eq!(uri.scheme(), Some("csv"));
        assert_eq!(uri.location(), "/tmp/book.csv");
        assert!(uri.is_absolute());
    }

    #[test]
    fn parses_bare_location() {
        let uri = Uri::parse("/tmp/book.csv").unwrap();
        assert_eq!(uri.scheme(), None);
        assert_eq!(uri.location(), "/tmp/book.csv");
        assert!(!uri.is_absolute());
    }

    #[test]
    fn location_may_contain_further_separators() {
        let uri = Uri::parse("csv://dir://odd/path.csv").unwrap();
        assert_eq!(uri.scheme(), Some("csv"));
        assert_eq!(uri.location(), "dir://odd/path.csv");
    }

    #[test]
    fn empty_string_is_an_empty_location() {
        let uri = Uri::parse("").unwrap();
        assert_eq!(uri.scheme(), None);
        assert_eq!(uri.location(), "");
    }

    #[test]
    fn renders_back_to_string() {
        assert_eq!(
            Uri::parse("csv:///tmp/a.csv").unwrap().to_string(),
            "csv:///tmp/a.csv"
        );
        assert_eq!(Uri::parse("a.csv").unwrap().to_string(), "a.csv");
        assert_eq!(Uri::with_scheme("json", "b.json").to_string(), "json://b.json");
    }

    #[test]
    fn absolutize_guesses_scheme_from_resolver() {
        let resolver = Resolver::with_builtins();
        let mut uri = Uri::parse("book.csv").unwrap();
        uri.absolutize(&resolver);
        assert_eq!(uri.scheme(), Some("csv"));
    }

    #[test]
    fn absolutize_leaves_unknown_locations_relative() {
        let resolver = Resolver::with_builtins();
        let mut uri = Uri::parse("book.xyz").unwrap();
        uri.absolutize(&resolver);
        assert_eq!(uri.scheme(), None);
    }

    #[test]
    fn absolutize_keeps_existing_scheme() {
        let resolver = Resolver::with_builtins();
        let mut uri = Uri::parse("json://book.csv").unwrap();
        uri.absolutize(&resolver);
        assert_eq!(uri.scheme(), Some("json"));
    }
}
