//! Validated web URL type.

use core::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Errors that can occur when parsing a [`WebUrl`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WebUrlError {
    /// The input string is empty.
    #[error("URL cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("URL must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is not a syntactically valid absolute URL.
    #[error("{0}")]
    Malformed(#[from] url::ParseError),
    /// The scheme is not `http` or `https`.
    #[error("URL scheme must be http or https, got '{0}'")]
    UnsupportedScheme(String),
    /// The URL has no host.
    #[error("URL must have a host")]
    MissingHost,
}

/// An absolute `http` or `https` URL.
///
/// Parsing canonicalizes the URL, so two inputs that differ only in
/// normalization (scheme case, missing root path) compare equal afterwards.
///
/// ## Constraints
///
/// - Length: 1-2083 characters
/// - Scheme: `http` or `https`
/// - Must have a host
///
/// ## Examples
///
/// ```
/// use macprice_core::WebUrl;
///
/// let url = WebUrl::parse("HTTPS://prf.hn").unwrap();
/// assert_eq!(url.as_str(), "https://prf.hn/");
///
/// assert!(WebUrl::parse("ftp://example.com").is_err());
/// assert!(WebUrl::parse("not a url").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebUrl(Url);

impl WebUrl {
    /// Maximum length of a URL accepted by common browsers.
    pub const MAX_LENGTH: usize = 2083;

    /// Parse a `WebUrl` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty or longer than 2083 characters
    /// - Is not an absolute URL
    /// - Uses a scheme other than `http`/`https`
    /// - Has no host
    pub fn parse(s: &str) -> Result<Self, WebUrlError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(WebUrlError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(WebUrlError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let url = Url::parse(s)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(WebUrlError::UnsupportedScheme(url.scheme().to_owned()));
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(WebUrlError::MissingHost);
        }

        Ok(Self(url))
    }

    /// Returns the canonical URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host name.
    #[must_use]
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// Returns the underlying parsed URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl std::str::FromStr for WebUrl {
    type Err = WebUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WebUrl {
    type Error = WebUrlError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<WebUrl> for String {
    fn from(url: WebUrl) -> Self {
        url.0.into()
    }
}

impl AsRef<str> for WebUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_urls() {
        assert!(WebUrl::parse("https://www.coolblue.nl/").is_ok());
        assert!(WebUrl::parse("http://example.com/path?q=1").is_ok());
        assert!(WebUrl::parse("https://prf.hn/click/camref:1101l88G8").is_ok());
    }

    #[test]
    fn test_parse_canonicalizes() {
        let url = WebUrl::parse("https://partner.bol.com").unwrap();
        assert_eq!(url.as_str(), "https://partner.bol.com/");
        assert_eq!(url.host(), "partner.bol.com");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(WebUrl::parse(""), Err(WebUrlError::Empty)));
        assert!(matches!(WebUrl::parse("   "), Err(WebUrlError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("https://example.com/{}", "a".repeat(2100));
        assert!(matches!(
            WebUrl::parse(&long),
            Err(WebUrlError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_relative() {
        assert!(matches!(
            WebUrl::parse("/logo.png"),
            Err(WebUrlError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        assert!(matches!(
            WebUrl::parse("mailto:shop@example.com"),
            Err(WebUrlError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let url = WebUrl::parse("https://www.bol.com/nl/").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, "\"https://www.bol.com/nl/\"");

        let parsed: WebUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, url);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<WebUrl>("\"nope\"").is_err());
    }
}
