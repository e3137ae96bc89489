//! Retailer records.

use serde_json::Value;

use super::fields::{self, Fields};
use super::{Record, ValidationError};
use crate::document::Document;
use crate::types::{CountryCode, WebUrl};

/// A shop selling MacBooks in one market.
///
/// ## Constraints
///
/// - `country` is NL or BE
/// - `rating`, when present, is within 0..=5
/// - `site_url`, `logo_url` and `affiliate_url` are http(s) URLs
#[derive(Debug, Clone, PartialEq)]
pub struct Retailer {
    name: String,
    country: CountryCode,
    logo_url: Option<WebUrl>,
    site_url: WebUrl,
    affiliate_url: Option<WebUrl>,
    rating: Option<f64>,
}

impl Retailer {
    /// Lowest allowed rating.
    pub const MIN_RATING: f64 = 0.0;
    /// Highest allowed rating.
    pub const MAX_RATING: f64 = 5.0;

    /// Display name, also the natural key offers refer to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Market the retailer serves.
    #[must_use]
    pub const fn country(&self) -> CountryCode {
        self.country
    }

    /// Public logo image.
    #[must_use]
    pub const fn logo_url(&self) -> Option<&WebUrl> {
        self.logo_url.as_ref()
    }

    /// Homepage.
    #[must_use]
    pub const fn site_url(&self) -> &WebUrl {
        &self.site_url
    }

    /// Affiliate deep link or placeholder.
    #[must_use]
    pub const fn affiliate_url(&self) -> Option<&WebUrl> {
        self.affiliate_url.as_ref()
    }

    /// Average rating out of 5.
    #[must_use]
    pub const fn rating(&self) -> Option<f64> {
        self.rating
    }
}

impl Record for Retailer {
    const COLLECTION: &'static str = "retailer";

    fn from_document(document: &Document) -> Result<Self, ValidationError> {
        let f = Fields::new(document);

        let rating = f.optional_f64("rating")?;
        if rating.is_some_and(|r| !(Self::MIN_RATING..=Self::MAX_RATING).contains(&r)) {
            return Err(ValidationError::OutOfRange {
                field: "rating",
                constraint: "between 0 and 5",
            });
        }

        Ok(Self {
            name: f.required_str("name")?,
            country: f.required_country("country")?,
            logo_url: f.optional_url("logo_url")?,
            site_url: f.required_url("site_url")?,
            affiliate_url: f.optional_url("affiliate_url")?,
            rating,
        })
    }

    fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("name".into(), Value::from(self.name.as_str()));
        doc.insert("country".into(), self.country.into());
        doc.insert("logo_url".into(), fields::opt(self.logo_url.as_ref().map(fields::url)));
        doc.insert("site_url".into(), fields::url(&self.site_url));
        doc.insert(
            "affiliate_url".into(),
            fields::opt(self.affiliate_url.as_ref().map(fields::url)),
        );
        doc.insert("rating".into(), fields::opt(self.rating));
        doc
    }
}

impl_record_serde!(Retailer);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn coolblue() -> Value {
        json!({
            "name": "Coolblue",
            "country": "NL",
            "site_url": "https://www.coolblue.nl/",
            "logo_url": "https://assets.coolblue.nl/logo.png",
            "affiliate_url": "https://prf.hn/click/camref:1101l88G8"
        })
    }

    #[test]
    fn test_valid_retailer() {
        let retailer = Retailer::from_value(&coolblue()).unwrap();
        assert_eq!(retailer.name(), "Coolblue");
        assert_eq!(retailer.country(), CountryCode::NL);
        assert_eq!(retailer.site_url().host(), "www.coolblue.nl");
        assert_eq!(retailer.rating(), None);
    }

    #[test]
    fn test_unsupported_country_rejected() {
        let mut input = coolblue();
        input["country"] = json!("US");
        assert!(matches!(
            Retailer::from_value(&input),
            Err(ValidationError::NotAllowed {
                field: "country",
                ..
            })
        ));
    }

    #[test]
    fn test_rating_bounds() {
        let mut input = coolblue();
        input["rating"] = json!(5);
        assert_eq!(Retailer::from_value(&input).unwrap().rating(), Some(5.0));

        input["rating"] = json!(5.1);
        assert!(matches!(
            Retailer::from_value(&input),
            Err(ValidationError::OutOfRange {
                field: "rating",
                ..
            })
        ));

        input["rating"] = json!(-0.5);
        assert!(Retailer::from_value(&input).is_err());
    }

    #[test]
    fn test_site_url_required() {
        let mut input = coolblue();
        input.as_object_mut().unwrap().remove("site_url");
        assert_eq!(
            Retailer::from_value(&input),
            Err(ValidationError::Missing { field: "site_url" })
        );
    }

    #[test]
    fn test_malformed_logo_url() {
        let mut input = coolblue();
        input["logo_url"] = json!("logo.png");
        assert!(matches!(
            Retailer::from_value(&input),
            Err(ValidationError::InvalidUrl {
                field: "logo_url",
                ..
            })
        ));
    }

    #[test]
    fn test_document_has_declared_fields() {
        let doc = Retailer::from_value(&json!({
            "name": "Selexion",
            "country": "BE",
            "site_url": "https://www.selexion.be",
            "rating": "4.5",
            "_id": "65f0c2",
            "extra": true
        }))
        .unwrap()
        .to_document();

        assert_eq!(
            Value::Object(doc),
            json!({
                "name": "Selexion",
                "country": "BE",
                "logo_url": null,
                "site_url": "https://www.selexion.be/",
                "affiliate_url": null,
                "rating": 4.5
            })
        );
    }

    #[test]
    fn test_roundtrip() {
        let retailer = Retailer::from_value(&coolblue()).unwrap();
        assert_eq!(Retailer::from_document(&retailer.to_document()).unwrap(), retailer);

        let json = serde_json::to_string(&retailer).unwrap();
        let parsed: Retailer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, retailer);
    }

    #[test]
    fn test_roundtrip_boundary_ratings() {
        for rating in [0.0, 5.0, 4.123_456_789_012_345, 5e-324, 4.999_999_999_999_999] {
            let mut input = coolblue();
            input["rating"] = json!(rating);
            let retailer = Retailer::from_value(&input).unwrap();

            assert_eq!(retailer.to_document()["rating"], json!(rating));
            assert_eq!(Retailer::from_document(&retailer.to_document()).unwrap(), retailer);

            let text = serde_json::to_string(&retailer).unwrap();
            assert_eq!(serde_json::from_str::<Retailer>(&text).unwrap(), retailer);
        }
    }
}
