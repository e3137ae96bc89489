//! Record schemas for the four catalogue collections.
//!
//! Every record type is an immutable value produced only by validation. The
//! [`Record`] trait ties a type to its collection and defines the conversion
//! to and from plain [`Document`]s; `serde` support is derived from that
//! conversion, so deserializing a record always validates it.
//!
//! | Type | Collection |
//! |---|---|
//! | [`Retailer`] | `retailer` |
//! | [`Macbook`] | `macbook` |
//! | [`Offer`] | `offer` |
//! | [`Post`] | `post` |

use serde_json::Value;

use crate::document::Document;

/// Implements `Serialize`, `Deserialize` and `TryFrom<Document>` for a
/// [`Record`] type in terms of its document conversion.
macro_rules! impl_record_serde {
    ($name:ident) => {
        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(
                    &$crate::schema::Record::to_document(self),
                    serializer,
                )
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error> {
                let document = <$crate::Document as ::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::schema::Record>::from_document(&document)
                    .map_err(::serde::de::Error::custom)
            }
        }

        impl TryFrom<$crate::Document> for $name {
            type Error = $crate::schema::ValidationError;

            fn try_from(document: $crate::Document) -> Result<Self, Self::Error> {
                <Self as $crate::schema::Record>::from_document(&document)
            }
        }
    };
}

mod error;
mod fields;
mod macbook;
mod offer;
mod post;
mod retailer;

pub use error::ValidationError;
pub use macbook::Macbook;
pub use offer::Offer;
pub use post::Post;
pub use retailer::Retailer;

/// A typed record stored in its own collection.
pub trait Record: Sized + Send + Sync {
    /// Name of the collection holding records of this type.
    const COLLECTION: &'static str;

    /// Validate a document and build a record from it.
    ///
    /// Fields not declared by the schema (including the store's identifier)
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field that is missing,
    /// has the wrong type, or violates a constraint.
    fn from_document(document: &Document) -> Result<Self, ValidationError>;

    /// Serialize the record to a document with exactly the declared fields.
    ///
    /// Optional fields that are unset are written as `null`.
    fn to_document(&self) -> Document;

    /// Validate an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAnObject`] if `value` is not an object,
    /// otherwise whatever [`Record::from_document`] returns.
    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        value
            .as_object()
            .ok_or(ValidationError::NotAnObject)
            .and_then(Self::from_document)
    }
}
