//! Price offers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use super::fields::{self, Fields};
use super::{Record, ValidationError};
use crate::document::Document;
use crate::types::{CountryCode, WebUrl};

/// A retailer's price for a MacBook model in one market.
///
/// `macbook_model` and `retailer_name` are soft references to
/// [`super::Macbook::model`] and [`super::Retailer::name`]; nothing checks
/// that the referenced records exist.
///
/// ## Constraints
///
/// - `country` is NL or BE
/// - `price_eur` is not negative
/// - `product_url` is an http(s) URL
/// - `in_stock` defaults to `true`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    macbook_model: String,
    retailer_name: String,
    country: CountryCode,
    price_eur: Decimal,
    product_url: WebUrl,
    in_stock: bool,
    last_checked: Option<DateTime<Utc>>,
}

impl Offer {
    /// Model of the MacBook on offer.
    #[must_use]
    pub fn macbook_model(&self) -> &str {
        &self.macbook_model
    }

    /// Name of the retailer making the offer.
    #[must_use]
    pub fn retailer_name(&self) -> &str {
        &self.retailer_name
    }

    /// Market the price applies to.
    #[must_use]
    pub const fn country(&self) -> CountryCode {
        self.country
    }

    /// Price in EUR.
    #[must_use]
    pub const fn price_eur(&self) -> Decimal {
        self.price_eur
    }

    /// Product page, affiliate link where possible.
    #[must_use]
    pub const fn product_url(&self) -> &WebUrl {
        &self.product_url
    }

    /// Whether the retailer had stock when last checked.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.in_stock
    }

    /// When the price was last verified.
    #[must_use]
    pub const fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked
    }
}

impl Record for Offer {
    const COLLECTION: &'static str = "offer";

    fn from_document(document: &Document) -> Result<Self, ValidationError> {
        let f = Fields::new(document);

        let macbook_model = f.required_str("macbook_model")?;
        let retailer_name = f.required_str("retailer_name")?;
        let country = f.required_country("country")?;
        let price_eur = f.required_decimal("price_eur")?;
        if price_eur.is_sign_negative() && !price_eur.is_zero() {
            return Err(ValidationError::OutOfRange {
                field: "price_eur",
                constraint: ">= 0",
            });
        }

        Ok(Self {
            macbook_model,
            retailer_name,
            country,
            price_eur,
            product_url: f.required_url("product_url")?,
            in_stock: f.bool_or("in_stock", true)?,
            last_checked: f.optional_timestamp("last_checked")?,
        })
    }

    fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("macbook_model".into(), Value::from(self.macbook_model.as_str()));
        doc.insert("retailer_name".into(), Value::from(self.retailer_name.as_str()));
        doc.insert("country".into(), self.country.into());
        doc.insert("price_eur".into(), fields::decimal(self.price_eur));
        doc.insert("product_url".into(), fields::url(&self.product_url));
        doc.insert("in_stock".into(), Value::Bool(self.in_stock));
        doc.insert(
            "last_checked".into(),
            fields::opt(self.last_checked.as_ref().map(fields::timestamp)),
        );
        doc
    }
}

impl_record_serde!(Offer);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn air_at_coolblue() -> Value {
        json!({
            "macbook_model": "MacBook Air 13 M2",
            "retailer_name": "Coolblue",
            "country": "NL",
            "price_eur": 1099.0,
            "product_url": "https://www.coolblue.nl/product/123"
        })
    }

    #[test]
    fn test_valid_offer_defaults() {
        let offer = Offer::from_value(&air_at_coolblue()).unwrap();
        assert_eq!(offer.macbook_model(), "MacBook Air 13 M2");
        assert_eq!(offer.retailer_name(), "Coolblue");
        assert_eq!(offer.price_eur(), Decimal::new(1099, 0));
        assert!(offer.in_stock());
        assert_eq!(offer.last_checked(), None);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut input = air_at_coolblue();
        input["price_eur"] = json!(-1);
        assert_eq!(
            Offer::from_value(&input),
            Err(ValidationError::OutOfRange {
                field: "price_eur",
                constraint: ">= 0",
            })
        );
    }

    #[test]
    fn test_zero_price_allowed() {
        let mut input = air_at_coolblue();
        input["price_eur"] = json!(0);
        assert_eq!(Offer::from_value(&input).unwrap().price_eur(), Decimal::ZERO);
    }

    #[test]
    fn test_price_from_string() {
        let mut input = air_at_coolblue();
        input["price_eur"] = json!("1299.99");
        assert_eq!(Offer::from_value(&input).unwrap().price_eur(), Decimal::new(129_999, 2));

        input["price_eur"] = json!("cheap");
        assert!(matches!(
            Offer::from_value(&input),
            Err(ValidationError::InvalidType {
                field: "price_eur",
                ..
            })
        ));
    }

    #[test]
    fn test_country_required() {
        let mut input = air_at_coolblue();
        input["country"] = Value::Null;
        assert_eq!(
            Offer::from_value(&input),
            Err(ValidationError::Missing { field: "country" })
        );
    }

    #[test]
    fn test_roundtrip_with_all_fields() {
        let mut input = air_at_coolblue();
        input["price_eur"] = json!(1249.5);
        input["in_stock"] = json!(false);
        input["last_checked"] = json!("2024-11-02T08:15:30.250Z");

        let offer = Offer::from_value(&input).unwrap();
        let doc = offer.to_document();
        assert_eq!(doc["price_eur"], json!(1249.5));
        assert_eq!(doc["in_stock"], json!(false));
        assert_eq!(doc["last_checked"], json!("2024-11-02T08:15:30.250Z"));
        assert_eq!(Offer::from_document(&doc).unwrap(), offer);

        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(serde_json::from_value::<Offer>(json).unwrap(), offer);
    }

    #[test]
    fn test_roundtrip_boundary_values() {
        let prices = [
            json!(0),
            json!(0.01),
            json!(33_490.717_240_570_35),
            json!(5.899_529_662_205_305e-8),
            json!(999_999_999_999_999.0),
            json!("1e3"),
        ];
        let timestamps = [
            json!(null),
            json!(0),
            json!(1_714_559_400.25),
            json!("1714559400.000001"),
            json!("0000-01-01T00:00:00Z"),
            json!("9999-12-31T23:59:59.999999999Z"),
            json!("2024-02-29"),
        ];

        for price in &prices {
            for last_checked in &timestamps {
                let mut input = air_at_coolblue();
                input["price_eur"] = price.clone();
                input["last_checked"] = last_checked.clone();

                let offer = Offer::from_value(&input).unwrap();
                let doc = offer.to_document();
                assert_eq!(Offer::from_document(&doc).unwrap(), offer, "{input}");

                let text = serde_json::to_string(&offer).unwrap();
                assert_eq!(serde_json::from_str::<Offer>(&text).unwrap(), offer, "{text}");
            }
        }
    }

    #[test]
    fn test_stored_price_is_input_number() {
        let mut input = air_at_coolblue();
        input["price_eur"] = json!(33_490.717_240_570_35);
        let offer = Offer::from_value(&input).unwrap();
        assert_eq!(offer.to_document()["price_eur"], json!(33_490.717_240_570_35));
    }

    #[test]
    fn test_far_future_last_checked_rejected() {
        let mut input = air_at_coolblue();
        input["last_checked"] = json!(600_000_000_000_i64);
        assert!(matches!(
            Offer::from_value(&input),
            Err(ValidationError::InvalidTimestamp {
                field: "last_checked",
                ..
            })
        ));
    }
}
