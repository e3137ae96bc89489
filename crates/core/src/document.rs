//! Plain document mappings and equality filters.
//!
//! Documents are what the store sees: untyped field-name to JSON value maps.
//! Typed records are converted to and from them by the [`crate::schema`]
//! layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A schemaless document: field name to JSON value.
pub type Document = serde_json::Map<String, Value>;

/// Name of the store-assigned identifier field.
///
/// Stores add this field to every document they return. It is not part of
/// any record schema and is stripped before validation.
pub const ID_FIELD: &str = "_id";

/// An equality filter over top-level document fields.
///
/// A document matches when every filter field is present in the document
/// with an equal value. The empty filter matches every document.
///
/// ```
/// use macprice_core::{CountryCode, Filter};
/// use serde_json::json;
///
/// let filter = Filter::new().eq("country", CountryCode::NL);
/// let doc = json!({"name": "Coolblue", "country": "NL"});
/// assert!(filter.matches(doc.as_object().unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, Value>);

impl Filter {
    /// Create an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Require `field` to equal `value` when a value is given.
    #[must_use]
    pub fn eq_opt<V: Into<Value>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    /// Returns true if the filter has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the `(field, value)` conditions in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if `document` satisfies every condition.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    /// Returns the filter as a JSON object.
    #[must_use]
    pub fn to_document(&self) -> Document {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
