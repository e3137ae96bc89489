//! Market country codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`CountryCode`] fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported country code: {0}")]
pub struct CountryCodeError(pub String);

/// Country a retailer, offer or post targets.
///
/// The site only covers the Dutch and Belgian markets, so this is a closed
/// set. Codes are matched exactly (`"nl"` is rejected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CountryCode {
    /// Netherlands.
    NL,
    /// Belgium.
    BE,
}

impl CountryCode {
    /// All supported codes, in display order.
    pub const ALL: [Self; 2] = [Self::NL, Self::BE];

    /// Human-readable list of allowed values, used in error messages.
    pub const ALLOWED: &'static str = "'NL', 'BE'";

    /// Returns the two-letter code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NL => "NL",
            Self::BE => "BE",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CountryCode {
    type Err = CountryCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NL" => Ok(Self::NL),
            "BE" => Ok(Self::BE),
            _ => Err(CountryCodeError(s.to_owned())),
        }
    }
}

impl From<CountryCode> for serde_json::Value {
    fn from(code: CountryCode) -> Self {
        Self::String(code.as_str().to_owned())
    }
}
