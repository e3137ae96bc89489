//! Validation failures raised by the record schemas.

/// Errors that can occur when validating a record from a document.
///
/// Every variant names the offending field so callers can report it back to
/// whoever supplied the input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input is not a field-name to value mapping.
    #[error("record must be an object")]
    NotAnObject,
    /// A required field is absent or `null`.
    #[error("{field}: field required")]
    Missing {
        /// Name of the missing field.
        field: &'static str,
    },
    /// The value cannot be coerced to the declared type.
    #[error("{field}: expected {expected}")]
    InvalidType {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable name of the expected type.
        expected: &'static str,
    },
    /// An enumerated field holds a value outside its allowed set.
    #[error("{field}: '{value}' is not one of {allowed}")]
    NotAllowed {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// The allowed values, for display.
        allowed: &'static str,
    },
    /// A numeric field violates its declared bound.
    #[error("{field}: must be {constraint}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The violated bound, e.g. `">= 2015"`.
        constraint: &'static str,
    },
    /// A URL-typed field is not a valid http(s) URL.
    #[error("{field}: invalid URL ({reason})")]
    InvalidUrl {
        /// Name of the offending field.
        field: &'static str,
        /// Why the URL was rejected.
        reason: String,
    },
    /// A timestamp field could not be parsed.
    #[error("{field}: invalid timestamp '{value}'")]
    InvalidTimestamp {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl ValidationError {
    /// Returns the name of the field that failed validation, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::NotAnObject => None,
            Self::Missing { field }
            | Self::InvalidType { field, .. }
            | Self::NotAllowed { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidUrl { field, .. }
            | Self::InvalidTimestamp { field, .. } => Some(field),
        }
    }
}
