//! Filter state
//!
//! The facet constraints a catalog query applies. Every facet with a
//! non-empty constraint must match; empty constraints impose nothing, so
//! [`FilterState::none`] passes every product. Facets are ANDed, which makes
//! the application order immaterial.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{facets::FacetSet, products::Product};

/// Errors related to filter construction.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The price band minimum exceeds its maximum (min, max).
    #[error("Price band minimum {0} exceeds maximum {1}")]
    InvertedRange(String, String),

    /// The band bounds use different currencies (min currency, max currency).
    #[error("Price band minimum is in {0}, but maximum is in {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// An inclusive price range, `min ≤ max`, in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand<'a> {
    min: Money<'a, Currency>,
    max: Money<'a, Currency>,
}

impl<'a> PriceBand<'a> {
    /// Create a price band.
    ///
    /// # Errors
    ///
    /// Returns a `FilterError` if the bounds use different currencies or
    /// `min` exceeds `max`.
    pub fn new(min: Money<'a, Currency>, max: Money<'a, Currency>) -> Result<Self, FilterError> {
        if min.currency() != max.currency() {
            return Err(FilterError::CurrencyMismatch(
                min.currency().iso_alpha_code,
                max.currency().iso_alpha_code,
            ));
        }

        if min.to_minor_units() > max.to_minor_units() {
            return Err(FilterError::InvertedRange(
                min.to_string(),
                max.to_string(),
            ));
        }

        Ok(PriceBand { min, max })
    }

    /// Whether a price falls inside the band (inclusive on both ends).
    ///
    /// A price in another currency is never inside the band.
    pub fn contains(&self, price: &Money<'a, Currency>) -> bool {
        price.currency() == self.min.currency()
            && price.to_minor_units() >= self.min.to_minor_units()
            && price.to_minor_units() <= self.max.to_minor_units()
    }

    /// The lower bound.
    #[must_use]
    pub fn min(&self) -> Money<'a, Currency> {
        self.min
    }

    /// The upper bound.
    #[must_use]
    pub fn max(&self) -> Money<'a, Currency> {
        self.max
    }

    /// The band currency.
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.min.currency()
    }
}

/// Filter State
#[derive(Debug, Clone, Default)]
pub struct FilterState<'a> {
    /// Category constraint; empty means any category
    pub categories: FacetSet,

    /// Size constraint; empty means any size
    pub sizes: FacetSet,

    /// Color constraint; empty means any color
    pub colors: FacetSet,

    /// Brand constraint; empty means any brand
    pub brands: FacetSet,

    /// Price constraint; `None` means any price
    pub price_range: Option<PriceBand<'a>>,
}

impl<'a> FilterState<'a> {
    /// A filter state with no constraints; passes every product.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether no facet carries a constraint.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.categories.is_empty()
            && self.sizes.is_empty()
            && self.colors.is_empty()
            && self.brands.is_empty()
            && self.price_range.is_none()
    }

    /// Whether a product passes every constrained facet.
    pub fn matches(&self, product: &Product<'a>) -> bool {
        self.matches_category(product)
            && self.matches_brand(product)
            && self.matches_size(product)
            && self.matches_color(product)
            && self.matches_price(product)
    }

    fn matches_category(&self, product: &Product<'a>) -> bool {
        self.categories.is_empty() || self.categories.contains(&product.category)
    }

    fn matches_brand(&self, product: &Product<'a>) -> bool {
        self.brands.is_empty() || self.brands.contains(&product.brand)
    }

    fn matches_size(&self, product: &Product<'a>) -> bool {
        self.sizes.is_empty() || product.sizes.iter().any(|size| self.sizes.contains(size))
    }

    fn matches_color(&self, product: &Product<'a>) -> bool {
        self.colors.is_empty() || self.colors.intersects(&product.colors)
    }

    fn matches_price(&self, product: &Product<'a>) -> bool {
        self.price_range
            .as_ref()
            .is_none_or(|band| band.contains(&product.price))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn sneaker<'a>() -> Product<'a> {
        let mut product = Product::new(
            "stan-smith",
            "Stan Smith Classic Sneakers",
            "Men",
            "Adidas",
            Money::from_minor(9000, USD),
        );

        product.sizes = smallvec!["8".to_string(), "9".to_string(), "10".to_string()];
        product.colors = FacetSet::from_strs(&["White", "Green"]);
        product
    }

    #[test]
    fn price_band_rejects_inverted_range() {
        let result = PriceBand::new(Money::from_minor(10000, USD), Money::from_minor(5000, USD));

        assert!(matches!(result, Err(FilterError::InvertedRange(_, _))));
    }

    #[test]
    fn price_band_rejects_mixed_currencies() {
        let result = PriceBand::new(Money::from_minor(1000, USD), Money::from_minor(5000, GBP));

        assert!(matches!(
            result,
            Err(FilterError::CurrencyMismatch("USD", "GBP"))
        ));
    }

    #[test]
    fn price_band_contains_is_inclusive() -> TestResult {
        let band = PriceBand::new(Money::from_minor(5000, USD), Money::from_minor(10000, USD))?;

        assert!(band.contains(&Money::from_minor(5000, USD)));
        assert!(band.contains(&Money::from_minor(7500, USD)));
        assert!(band.contains(&Money::from_minor(10000, USD)));
        assert!(!band.contains(&Money::from_minor(4999, USD)));
        assert!(!band.contains(&Money::from_minor(10001, USD)));

        Ok(())
    }

    #[test]
    fn price_band_never_contains_other_currencies() -> TestResult {
        let band = PriceBand::new(Money::from_minor(0, USD), Money::from_minor(10000, USD))?;

        assert!(!band.contains(&Money::from_minor(5000, GBP)));

        Ok(())
    }

    #[test]
    fn unconstrained_filters_match_everything() {
        let filters = FilterState::none();

        assert!(filters.is_unconstrained());
        assert!(filters.matches(&sneaker()));
    }

    #[test]
    fn category_constraint_is_exact() {
        let mut filters = FilterState::none();
        filters.categories = FacetSet::from_strs(&["Men"]);

        assert!(filters.matches(&sneaker()));

        filters.categories = FacetSet::from_strs(&["Women"]);
        assert!(!filters.matches(&sneaker()));
    }

    #[test]
    fn size_constraint_matches_any_listed_size() {
        let mut filters = FilterState::none();
        filters.sizes = FacetSet::from_strs(&["10", "12"]);

        assert!(filters.matches(&sneaker()));

        filters.sizes = FacetSet::from_strs(&["12", "13"]);
        assert!(!filters.matches(&sneaker()));
    }

    #[test]
    fn color_constraint_intersects_product_colors() {
        let mut filters = FilterState::none();
        filters.colors = FacetSet::from_strs(&["Green", "Navy"]);

        assert!(filters.matches(&sneaker()));

        filters.colors = FacetSet::from_strs(&["Navy"]);
        assert!(!filters.matches(&sneaker()));
    }

    #[test]
    fn price_constraint_uses_band_bounds() -> TestResult {
        let mut filters = FilterState::none();
        filters.price_range = Some(PriceBand::new(
            Money::from_minor(5000, USD),
            Money::from_minor(10000, USD),
        )?);

        assert!(filters.matches(&sneaker()));

        filters.price_range = Some(PriceBand::new(
            Money::from_minor(10000, USD),
            Money::from_minor(20000, USD),
        )?);

        assert!(!filters.matches(&sneaker()));

        Ok(())
    }

    #[test]
    fn all_facets_are_anded() -> TestResult {
        let mut filters = FilterState::none();

        filters.categories = FacetSet::from_strs(&["Men"]);
        filters.brands = FacetSet::from_strs(&["Adidas"]);
        filters.sizes = FacetSet::from_strs(&["9"]);
        filters.colors = FacetSet::from_strs(&["White"]);
        filters.price_range = Some(PriceBand::new(
            Money::from_minor(0, USD),
            Money::from_minor(10000, USD),
        )?);

        assert!(!filters.is_unconstrained());
        assert!(filters.matches(&sneaker()));

        // One failing facet fails the whole filter.
        filters.brands = FacetSet::from_strs(&["Nike"]);
        assert!(!filters.matches(&sneaker()));

        Ok(())
    }
}
