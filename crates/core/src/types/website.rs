//! Website URL field type.

use core::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Errors that can occur when parsing a [`Website`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum WebsiteError {
    /// The input string is empty.
    #[error("website cannot be empty")]
    Empty,
    /// The URL does not start with `http://` or `https://`.
    #[error("website must start with http:// or https://")]
    BadScheme,
    /// The input is not a parseable URL.
    #[error("invalid website URL: {0}")]
    Invalid(String),
}

/// A validated website URL as entered on winery and supplier records.
///
/// Only the scheme is constrained; everything else is whatever `url`
/// considers a valid absolute URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Website(String);

impl Website {
    /// Parse a `Website` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not an absolute URL, or uses
    /// a scheme other than `http`/`https`.
    pub fn parse(s: &str) -> Result<Self, WebsiteError> {
        if s.is_empty() {
            return Err(WebsiteError::Empty);
        }

        let url = Url::parse(s).map_err(|e| WebsiteError::Invalid(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(WebsiteError::BadScheme);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Website` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(Website::parse("https://weingut.at").is_ok());
        assert!(Website::parse("http://example.com/wines?y=2021").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(Website::parse("").is_err());
        assert!(matches!(
            Website::parse("ftp://example.com"),
            Err(WebsiteError::BadScheme)
        ));
        assert!(Website::parse("weingut.at").is_err());
        assert!(Website::parse("not a url").is_err());
    }
}
