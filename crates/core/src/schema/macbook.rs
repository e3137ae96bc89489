//! MacBook catalogue entries.

use serde_json::Value;

use super::fields::Fields;
use super::{Record, ValidationError};
use crate::document::Document;

/// A MacBook model in the catalogue.
///
/// ## Constraints
///
/// - `base_storage_gb` is at least 128
/// - `year` is 2015 or later
#[derive(Debug, Clone, PartialEq)]
pub struct Macbook {
    model: String,
    chip: String,
    size_inches: f64,
    base_storage_gb: u32,
    year: u32,
}

impl Macbook {
    /// Smallest base storage the catalogue lists.
    pub const MIN_BASE_STORAGE_GB: u32 = 128;
    /// Oldest release year the catalogue lists.
    pub const MIN_YEAR: u32 = 2015;

    /// Model identifier, e.g. "MacBook Air 13 M2". Offers refer to it.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Chip designation, e.g. "M3".
    #[must_use]
    pub fn chip(&self) -> &str {
        &self.chip
    }

    /// Screen size in inches.
    #[must_use]
    pub const fn size_inches(&self) -> f64 {
        self.size_inches
    }

    /// Base storage capacity in GB.
    #[must_use]
    pub const fn base_storage_gb(&self) -> u32 {
        self.base_storage_gb
    }

    /// Release year.
    #[must_use]
    pub const fn year(&self) -> u32 {
        self.year
    }
}

/// Read an integer field and check it against a lower bound.
fn at_least(
    f: &Fields<'_>,
    field: &'static str,
    min: u32,
    constraint: &'static str,
) -> Result<u32, ValidationError> {
    let value = f.required_i64(field)?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= min)
        .ok_or(ValidationError::OutOfRange { field, constraint })
}

impl Record for Macbook {
    const COLLECTION: &'static str = "macbook";

    fn from_document(document: &Document) -> Result<Self, ValidationError> {
        let f = Fields::new(document);
        Ok(Self {
            model: f.required_str("model")?,
            chip: f.required_str("chip")?,
            size_inches: f.required_f64("size_inches")?,
            base_storage_gb: at_least(
                &f,
                "base_storage_gb",
                Self::MIN_BASE_STORAGE_GB,
                ">= 128",
            )?,
            year: at_least(&f, "year", Self::MIN_YEAR, ">= 2015")?,
        })
    }

    fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("model".into(), Value::from(self.model.as_str()));
        doc.insert("chip".into(), Value::from(self.chip.as_str()));
        doc.insert("size_inches".into(), Value::from(self.size_inches));
        doc.insert("base_storage_gb".into(), Value::from(self.base_storage_gb));
        doc.insert("year".into(), Value::from(self.year));
        doc
    }
}

impl_record_serde!(Macbook);
