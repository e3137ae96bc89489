//! Starter catalogue data.
//!
//! Seeds are plain JSON inputs run through the same validation as API
//! writes. Seeding is not idempotent: running it twice stores every record
//! twice.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;

use macprice_core::{Macbook, Record, Retailer};

use crate::catalog;
use crate::db::Database;

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Records stored.
    pub inserted: usize,
    /// Records that failed validation or could not be written.
    pub failed: usize,
}

impl std::ops::Add for SeedReport {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            inserted: self.inserted + rhs.inserted,
            failed: self.failed + rhs.failed,
        }
    }
}

/// Top MacBook retailers in the Netherlands and Belgium.
#[must_use]
pub fn retailers() -> Vec<Value> {
    vec![
        // Netherlands
        json!({"name": "Coolblue", "country": "NL", "site_url": "https://www.coolblue.nl/", "logo_url": "https://assets.coolblue.nl/logo.png", "affiliate_url": "https://prf.hn/click/camref:1101l88G8"}),
        json!({"name": "Bol.com", "country": "NL", "site_url": "https://www.bol.com/nl/", "logo_url": "https://www.bol.com/logo.png", "affiliate_url": "https://partner.bol.com"}),
        json!({"name": "MediaMarkt NL", "country": "NL", "site_url": "https://www.mediamarkt.nl/", "logo_url": "https://www.mediamarkt.nl/logo.png", "affiliate_url": "https://www.awin1.com/"}),
        json!({"name": "Amac", "country": "NL", "site_url": "https://www.amac.nl/", "logo_url": "https://www.amac.nl/logo.png", "affiliate_url": "https://www.tradetracker.com/"}),
        json!({"name": "BCC", "country": "NL", "site_url": "https://www.bcc.nl/", "logo_url": "https://www.bcc.nl/logo.png", "affiliate_url": "https://www.tradetracker.com/"}),
        // Belgium
        json!({"name": "Coolblue BE", "country": "BE", "site_url": "https://www.coolblue.be/", "logo_url": "https://www.coolblue.be/logo.png", "affiliate_url": "https://prf.hn"}),
        json!({"name": "Bol.com BE", "country": "BE", "site_url": "https://www.bol.com/be-nl/", "logo_url": "https://www.bol.com/logo.png", "affiliate_url": "https://partner.bol.com"}),
        json!({"name": "MediaMarkt BE", "country": "BE", "site_url": "https://www.mediamarkt.be/", "logo_url": "https://www.mediamarkt.be/logo.png", "affiliate_url": "https://www.awin1.com/"}),
        json!({"name": "Switch", "country": "BE", "site_url": "https://www.switch.be/", "logo_url": "https://www.switch.be/logo.png", "affiliate_url": "https://www.tradetracker.com/"}),
        json!({"name": "Selexion", "country": "BE", "site_url": "https://www.selexion.be/", "logo_url": "https://www.selexion.be/logo.png"}),
    ]
}

/// Current Apple silicon MacBook line-up.
#[must_use]
pub fn macbooks() -> Vec<Value> {
    vec![
        json!({"model": "MacBook Air 13 M2", "chip": "M2", "size_inches": 13.6, "base_storage_gb": 256, "year": 2022}),
        json!({"model": "MacBook Air 15 M2", "chip": "M2", "size_inches": 15.3, "base_storage_gb": 256, "year": 2023}),
        json!({"model": "MacBook Pro 14 M3", "chip": "M3", "size_inches": 14.2, "base_storage_gb": 512, "year": 2023}),
        json!({"model": "MacBook Pro 16 M3", "chip": "M3", "size_inches": 16.2, "base_storage_gb": 512, "year": 2023}),
    ]
}

/// Store the starter retailers.
pub async fn seed_retailers(db: &Database) -> SeedReport {
    insert_all::<Retailer>(db, retailers()).await
}

/// Store the starter MacBook catalogue.
pub async fn seed_macbooks(db: &Database) -> SeedReport {
    insert_all::<Macbook>(db, macbooks()).await
}

/// Add each input independently, logging and counting failures instead of
/// stopping at the first one.
#[instrument(skip(db, inputs), fields(collection = R::COLLECTION, total = inputs.len()))]
async fn insert_all<R: Record>(db: &Database, inputs: Vec<Value>) -> SeedReport {
    let mut report = SeedReport::default();

    for input in &inputs {
        match catalog::add::<R>(db, input).await {
            Ok(_) => report.inserted += 1,
            Err(e) => {
                tracing::warn!(error = %e, "Seed record not inserted");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        inserted = report.inserted,
        failed = report.failed,
        "Seeding finished"
    );
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use macprice_core::{CountryCode, Filter};

    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_seed_data_is_valid() {
        for input in retailers() {
            Retailer::from_value(&input).unwrap();
        }
        for input in macbooks() {
            Macbook::from_value(&input).unwrap();
        }
    }

    #[tokio::test]
    async fn test_seed_retailers() {
        let db = Database::new(MemoryStore::new());
        let report = seed_retailers(&db).await;
        assert_eq!(
            report,
            SeedReport {
                inserted: 10,
                failed: 0
            }
        );

        let belgian: Vec<Retailer> =
            catalog::list(&db, &Filter::new().eq("country", CountryCode::BE))
                .await
                .unwrap();
        assert_eq!(belgian.len(), 5);
    }

    #[tokio::test]
    async fn test_seeding_twice_duplicates() {
        let db = Database::new(MemoryStore::new());
        let report = seed_macbooks(&db).await + seed_macbooks(&db).await;
        assert_eq!(report.inserted, 8);

        let macs: Vec<Macbook> = catalog::list(&db, &Filter::new()).await.unwrap();
        assert_eq!(macs.len(), 8);
    }

    #[tokio::test]
    async fn test_unavailable_store_counts_failures() {
        let report = seed_macbooks(&Database::unavailable()).await;
        assert_eq!(
            report,
            SeedReport {
                inserted: 0,
                failed: 4
            }
        );
    }
}
