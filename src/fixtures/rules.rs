//! Checkout Rules Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, products},
    summary::CheckoutRules,
};

/// Checkout rules in YAML
#[derive(Debug, Deserialize)]
pub struct RulesFixture {
    /// Tax rate applied to the subtotal (e.g., "8%" or "0.08")
    pub tax_rate: String,

    /// Subtotal from which shipping is free (e.g., "75.00 USD")
    pub free_shipping_threshold: String,

    /// Shipping charged below the threshold (e.g., "5.99 USD")
    pub flat_shipping_rate: String,
}

impl TryFrom<RulesFixture> for CheckoutRules<'_> {
    type Error = FixtureError;

    fn try_from(fixture: RulesFixture) -> Result<Self, Self::Error> {
        let tax_rate = products::parse_percentage(&fixture.tax_rate)?;

        let (threshold_minor, threshold_currency) =
            products::parse_price(&fixture.free_shipping_threshold)?;

        let (flat_minor, flat_currency) = products::parse_price(&fixture.flat_shipping_rate)?;

        Ok(CheckoutRules::new(
            tax_rate,
            Money::from_minor(threshold_minor, threshold_currency),
            Money::from_minor(flat_minor, flat_currency),
        )?)
    }
}
