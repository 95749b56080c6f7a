//! Promotion Fixtures

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::fixtures::{FixtureError, products};

/// Wrapper for promo codes in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Map of promo code -> fixed discount amount (e.g., "20.00 USD")
    pub promotions: FxHashMap<String, String>,
}

impl PromotionsFixture {
    /// Parse the table into `(code, minor units, currency)` entries, sorted
    /// by code so error reporting and insertion order are deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if any discount amount fails to parse.
    pub fn parsed_entries(&self) -> Result<Vec<(String, i64, &'static Currency)>, FixtureError> {
        let mut raw: Vec<(&String, &String)> = self.promotions.iter().collect();

        raw.sort_by(|a, b| a.0.cmp(b.0));

        raw.into_iter()
            .map(|(code, amount)| {
                let (minor_units, currency) = products::parse_price(amount)?;

                Ok((code.clone(), minor_units, currency))
            })
            .collect()
    }
}
