//! Typed field access over an untyped document.
//!
//! Each accessor implements one coercion rule. `null` is treated as absent:
//! optional accessors return `None`, required ones fail with
//! [`ValidationError::Missing`].

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use super::ValidationError;
use crate::document::Document;
use crate::types::{CountryCode, WebUrl};

/// Read-only view of a document with per-field coercion.
pub(crate) struct Fields<'a> {
    document: &'a Document,
}

impl<'a> Fields<'a> {
    pub(crate) const fn new(document: &'a Document) -> Self {
        Self { document }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.document.get(field).filter(|v| !v.is_null())
    }

    fn require(&self, field: &'static str) -> Result<&'a Value, ValidationError> {
        self.get(field).ok_or(ValidationError::Missing { field })
    }

    pub(crate) fn required_str(&self, field: &'static str) -> Result<String, ValidationError> {
        as_string(field, self.require(field)?)
    }

    pub(crate) fn optional_str(
        &self,
        field: &'static str,
    ) -> Result<Option<String>, ValidationError> {
        self.get(field).map(|v| as_string(field, v)).transpose()
    }

    pub(crate) fn required_country(
        &self,
        field: &'static str,
    ) -> Result<CountryCode, ValidationError> {
        as_country(field, self.require(field)?)
    }

    pub(crate) fn optional_country(
        &self,
        field: &'static str,
    ) -> Result<Option<CountryCode>, ValidationError> {
        self.get(field).map(|v| as_country(field, v)).transpose()
    }

    pub(crate) fn required_url(&self, field: &'static str) -> Result<WebUrl, ValidationError> {
        as_url(field, self.require(field)?)
    }

    pub(crate) fn optional_url(
        &self,
        field: &'static str,
    ) -> Result<Option<WebUrl>, ValidationError> {
        self.get(field).map(|v| as_url(field, v)).transpose()
    }

    pub(crate) fn required_f64(&self, field: &'static str) -> Result<f64, ValidationError> {
        as_f64(field, self.require(field)?)
    }

    pub(crate) fn optional_f64(
        &self,
        field: &'static str,
    ) -> Result<Option<f64>, ValidationError> {
        self.get(field).map(|v| as_f64(field, v)).transpose()
    }

    pub(crate) fn required_i64(&self, field: &'static str) -> Result<i64, ValidationError> {
        as_i64(field, self.require(field)?)
    }

    pub(crate) fn required_decimal(&self, field: &'static str) -> Result<Decimal, ValidationError> {
        let value = as_f64(field, self.require(field)?)?;
        // Canonical form is the shortest decimal that maps back to the same
        // JSON number. Amounts needing more than 28 decimal places would be
        // rounded and are rejected instead.
        Decimal::from_str(&value.to_string())
            .ok()
            .map(|d| d.normalize())
            .filter(|d| decimal_to_f64(*d) == Some(value))
            .ok_or(ValidationError::OutOfRange {
                field,
                constraint: "a representable amount",
            })
    }

    pub(crate) fn bool_or(&self, field: &'static str, default: bool) -> Result<bool, ValidationError> {
        self.get(field).map_or(Ok(default), |v| as_bool(field, v))
    }

    pub(crate) fn optional_timestamp(
        &self,
        field: &'static str,
    ) -> Result<Option<DateTime<Utc>>, ValidationError> {
        self.get(field).map(|v| as_timestamp(field, v)).transpose()
    }
}

fn as_string(field: &'static str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::InvalidType {
            field,
            expected: "a string",
        })
}

fn as_country(field: &'static str, value: &Value) -> Result<CountryCode, ValidationError> {
    let raw = value.as_str().ok_or(ValidationError::InvalidType {
        field,
        expected: "a country code string",
    })?;
    raw.parse().map_err(|_| ValidationError::NotAllowed {
        field,
        value: raw.to_owned(),
        allowed: CountryCode::ALLOWED,
    })
}

fn as_url(field: &'static str, value: &Value) -> Result<WebUrl, ValidationError> {
    let raw = value.as_str().ok_or(ValidationError::InvalidType {
        field,
        expected: "a URL string",
    })?;
    WebUrl::parse(raw).map_err(|e| ValidationError::InvalidUrl {
        field,
        reason: e.to_string(),
    })
}

fn as_f64(field: &'static str, value: &Value) -> Result<f64, ValidationError> {
    let invalid = ValidationError::InvalidType {
        field,
        expected: "a number",
    };
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite()).ok_or(invalid)
}

fn as_i64(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    let invalid = ValidationError::InvalidType {
        field,
        expected: "an integer",
    };
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).and_then(|f| f.to_i64()))
            .ok_or(invalid),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid),
        _ => Err(invalid),
    }
}

fn as_bool(field: &'static str, value: &Value) -> Result<bool, ValidationError> {
    let invalid = ValidationError::InvalidType {
        field,
        expected: "a boolean",
    };
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(invalid),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(invalid),
        },
        _ => Err(invalid),
    }
}

fn as_timestamp(field: &'static str, value: &Value) -> Result<DateTime<Utc>, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| n.as_f64().and_then(from_unix_seconds)),
        Value::String(s) => parse_timestamp(s.trim()),
        _ => None,
    };
    // RFC 3339 output only covers four-digit years
    parsed
        .filter(|dt| (0..=9999).contains(&dt.year()))
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

/// Parse an RFC 3339 timestamp, a naive ISO 8601 timestamp (taken as UTC),
/// a bare date (midnight UTC), or unix seconds.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    s.parse::<f64>().ok().and_then(from_unix_seconds)
}

/// Convert possibly fractional unix seconds, kept to microsecond precision.
fn from_unix_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let micros = ((secs - whole) * 1_000_000.0).round().to_i64()?;
    DateTime::from_timestamp(whole.to_i64()?, 0)?
        .checked_add_signed(TimeDelta::microseconds(micros))
}

/// The JSON number a decimal amount is stored as.
///
/// Goes through the decimal string so the result is the correctly rounded
/// `f64`, not an accumulation of integer and fractional parts.
fn decimal_to_f64(value: Decimal) -> Option<f64> {
    value.to_string().parse::<f64>().ok()
}

/// Canonical serialized form of an optional value.
pub(crate) fn opt<T: Into<Value>>(value: Option<T>) -> Value {
    value.map_or(Value::Null, Into::into)
}

/// Canonical serialized form of a URL.
pub(crate) fn url(value: &WebUrl) -> Value {
    Value::String(value.as_str().to_owned())
}

/// Canonical serialized form of a decimal amount.
pub(crate) fn decimal(value: Decimal) -> Value {
    decimal_to_f64(value).map_or(Value::Null, Value::from)
}

/// Canonical serialized form of a timestamp.
pub(crate) fn timestamp(value: &DateTime<Utc>) -> Value {
    Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: &Value) -> Fields<'_> {
        Fields::new(value.as_object().unwrap())
    }

    #[test]
    fn test_null_is_missing() {
        let doc = json!({"name": null});
        assert_eq!(
            fields(&doc).required_str("name"),
            Err(ValidationError::Missing { field: "name" })
        );
        assert_eq!(fields(&doc).optional_str("name"), Ok(None));
    }

    #[test]
    fn test_strings_are_not_coerced_from_numbers() {
        let doc = json!({"name": 42});
        assert!(matches!(
            fields(&doc).required_str("name"),
            Err(ValidationError::InvalidType { field: "name", .. })
        ));
    }

    #[test]
    fn test_numeric_strings_become_numbers() {
        let doc = json!({"size": " 13.6 ", "year": "2023", "whole": 256.0});
        let f = fields(&doc);
        assert!((f.required_f64("size").unwrap() - 13.6).abs() < f64::EPSILON);
        assert_eq!(f.required_i64("year").unwrap(), 2023);
        assert_eq!(f.required_i64("whole").unwrap(), 256);
    }

    #[test]
    fn test_fractional_integer_rejected() {
        let doc = json!({"year": 2022.5});
        assert!(fields(&doc).required_i64("year").is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let doc = json!({"rating": "NaN", "size": "inf"});
        assert!(fields(&doc).optional_f64("rating").is_err());
        assert!(fields(&doc).required_f64("size").is_err());
    }

    #[test]
    fn test_bool_coercion() {
        let doc = json!({"a": "yes", "b": 0, "c": "maybe"});
        let f = fields(&doc);
        assert!(f.bool_or("a", false).unwrap());
        assert!(!f.bool_or("b", true).unwrap());
        assert!(f.bool_or("c", true).is_err());
        assert!(f.bool_or("absent", true).unwrap());
    }

    #[test]
    fn test_decimal_is_canonical() {
        let doc = json!({"price": "1299.990"});
        let price = fields(&doc).required_decimal("price").unwrap();
        assert_eq!(price.to_string(), "1299.99");
        assert_eq!(decimal(price), json!(1299.99));
    }

    #[test]
    fn test_full_precision_decimal_is_stored_exactly() {
        for input in [
            33_490.717_240_570_35,
            5.899_529_662_205_305e-8,
            0.1,
            1_234_567_890_123.456,
            999_999_999_999_999.0,
        ] {
            let doc = json!({ "price": input });
            let price = fields(&doc).required_decimal("price").unwrap();
            assert_eq!(decimal(price), json!(input), "{input}");

            let stored = json!({ "price": decimal(price) });
            assert_eq!(fields(&stored).required_decimal("price").unwrap(), price);
        }
    }

    #[test]
    fn test_unrepresentable_decimal_rejected() {
        let doc = json!({"price": 1.5e-30});
        assert!(matches!(
            fields(&doc).required_decimal("price"),
            Err(ValidationError::OutOfRange { field: "price", .. })
        ));
    }

    #[test]
    fn test_unix_seconds_variants() {
        let expected = fields(&json!({"t": "2024-05-01T10:30:00.5Z"}))
            .optional_timestamp("t")
            .unwrap();
        assert!(expected.is_some());

        for raw in [json!(1_714_559_400.5), json!("1714559400.5"), json!(" 1714559400.5 ")] {
            let doc = json!({ "t": raw });
            assert_eq!(fields(&doc).optional_timestamp("t").unwrap(), expected, "{raw}");
        }

        let doc = json!({"t": "1714559400"});
        assert_eq!(
            fields(&doc).optional_timestamp("t").unwrap().map(|t| timestamp(&t)),
            Some(json!("2024-05-01T10:30:00Z"))
        );
    }

    #[test]
    fn test_timestamp_outside_four_digit_years_rejected() {
        for raw in [
            json!(600_000_000_000_i64),
            json!(-62_200_000_000_i64),
            json!("600000000000"),
            json!(6.0e11),
            json!("+20983-03-30T10:40:00Z"),
        ] {
            let doc = json!({ "t": raw });
            assert!(
                matches!(
                    fields(&doc).optional_timestamp("t"),
                    Err(ValidationError::InvalidTimestamp { field: "t", .. })
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_timestamp_year_bounds_read_back() {
        for raw in ["0000-01-01T00:00:00Z", "9999-12-31T23:59:59.999999Z"] {
            let doc = json!({ "t": raw });
            let parsed = fields(&doc).optional_timestamp("t").unwrap().unwrap();
            let stored = json!({ "t": timestamp(&parsed) });
            assert_eq!(fields(&stored).optional_timestamp("t").unwrap(), Some(parsed));
        }
    }

    #[test]
    fn test_timestamp_formats() {
        let rfc = json!({"t": "2024-05-01T12:30:00+02:00"});
        let naive = json!({"t": "2024-05-01T10:30:00"});
        let unix = json!({"t": 1_714_559_400});
        let expected = fields(&rfc).optional_timestamp("t").unwrap().unwrap();

        assert_eq!(fields(&naive).optional_timestamp("t").unwrap(), Some(expected));
        assert_eq!(fields(&unix).optional_timestamp("t").unwrap(), Some(expected));
        assert_eq!(timestamp(&expected), json!("2024-05-01T10:30:00Z"));
    }

    #[test]
    fn test_bad_timestamp() {
        let doc = json!({"t": "yesterday"});
        assert!(matches!(
            fields(&doc).optional_timestamp("t"),
            Err(ValidationError::InvalidTimestamp { field: "t", .. })
        ));
    }

    #[test]
    fn test_country_outside_set() {
        let doc = json!({"country": "US"});
        assert_eq!(
            fields(&doc).required_country("country"),
            Err(ValidationError::NotAllowed {
                field: "country",
                value: "US".to_owned(),
                allowed: CountryCode::ALLOWED,
            })
        );
    }
}
