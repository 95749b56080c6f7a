//! Sort keys
//!
//! The orderings a catalog query can apply to its hits. Every sort is
//! stable, so products that compare equal keep their catalog order, and
//! [`SortKey::Relevance`] leaves the hits exactly as the catalog ordered
//! them.

use std::{cmp::Reverse, fmt, str::FromStr};

use thiserror::Error;

use crate::products::{Product, ProductKey};

/// The unrecognised sort key name.
#[derive(Debug, Error)]
#[error("Unknown sort key {0:?}")]
pub struct ParseSortKeyError(String);

/// Sort Key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order; the order products were inserted
    #[default]
    Relevance,

    /// Cheapest first
    PriceAsc,

    /// Most expensive first
    PriceDesc,

    /// Highest rating first
    Rating,

    /// New arrivals first
    Newest,

    /// Most reviewed first
    Popularity,

    /// Name A to Z
    NameAsc,

    /// Name Z to A
    NameDesc,
}

impl SortKey {
    /// Every sort key, in display order.
    pub const ALL: [SortKey; 8] = [
        SortKey::Relevance,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Rating,
        SortKey::Newest,
        SortKey::Popularity,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    /// The kebab-case name of the sort key.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
            SortKey::Popularity => "popularity",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relevance" => Ok(SortKey::Relevance),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::Rating),
            "newest" => Ok(SortKey::Newest),
            "popularity" => Ok(SortKey::Popularity),
            "name-asc" => Ok(SortKey::NameAsc),
            "name-desc" => Ok(SortKey::NameDesc),
            other => Err(ParseSortKeyError(other.to_string())),
        }
    }
}

/// Reorder hits in place. All sorts are stable.
pub(crate) fn apply(hits: &mut [(ProductKey, &Product<'_>)], sort: SortKey) {
    match sort {
        SortKey::Relevance => {}
        SortKey::PriceAsc => {
            hits.sort_by_key(|(_, product)| product.price.to_minor_units());
        }
        SortKey::PriceDesc => {
            hits.sort_by_key(|(_, product)| Reverse(product.price.to_minor_units()));
        }
        SortKey::Rating => {
            hits.sort_by_key(|(_, product)| Reverse(product.rating));
        }
        SortKey::Newest => {
            hits.sort_by_key(|(_, product)| Reverse(product.is_new));
        }
        SortKey::Popularity => {
            hits.sort_by_key(|(_, product)| Reverse(product.review_count));
        }
        SortKey::NameAsc => {
            hits.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));
        }
        SortKey::NameDesc => {
            hits.sort_by(|(_, a), (_, b)| b.name.cmp(&a.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;
    use crate::catalog::Catalog;

    fn test_catalog<'a>() -> Result<Catalog<'a>, crate::catalog::CatalogError> {
        let mut ultraboost = Product::new(
            "ultraboost",
            "Ultraboost Light Running Shoes",
            "Men",
            "Adidas",
            Money::from_minor(18000, USD),
        );
        ultraboost.rating = Decimal::new(49, 1);
        ultraboost.review_count = 412;
        ultraboost.is_new = true;

        let mut stan_smith = Product::new(
            "stan-smith",
            "Stan Smith Classic Sneakers",
            "Men",
            "Adidas",
            Money::from_minor(9000, USD),
        );
        stan_smith.rating = Decimal::new(46, 1);
        stan_smith.review_count = 1287;

        let mut suede = Product::new(
            "suede-classic",
            "Suede Classic XXI",
            "Women",
            "Puma",
            Money::from_minor(7500, USD),
        );
        suede.rating = Decimal::new(44, 1);
        suede.review_count = 530;

        Catalog::with_products([ultraboost, stan_smith, suede], USD)
    }

    fn sorted_ids(catalog: &Catalog<'_>, sort: SortKey) -> Vec<String> {
        let mut hits: Vec<_> = catalog.iter().collect();
        apply(&mut hits, sort);

        hits.into_iter()
            .map(|(_, product)| product.id.to_string())
            .collect()
    }

    #[test]
    fn relevance_keeps_catalog_order() -> TestResult {
        let catalog = test_catalog()?;

        assert_eq!(
            sorted_ids(&catalog, SortKey::Relevance),
            ["ultraboost", "stan-smith", "suede-classic"]
        );

        Ok(())
    }

    #[test]
    fn price_sorts_run_in_both_directions() -> TestResult {
        let catalog = test_catalog()?;

        assert_eq!(
            sorted_ids(&catalog, SortKey::PriceAsc),
            ["suede-classic", "stan-smith", "ultraboost"]
        );

        assert_eq!(
            sorted_ids(&catalog, SortKey::PriceDesc),
            ["ultraboost", "stan-smith", "suede-classic"]
        );

        Ok(())
    }

    #[test]
    fn rating_sort_puts_highest_first() -> TestResult {
        let catalog = test_catalog()?;

        assert_eq!(
            sorted_ids(&catalog, SortKey::Rating),
            ["ultraboost", "stan-smith", "suede-classic"]
        );

        Ok(())
    }

    #[test]
    fn newest_sort_is_stable_across_ties() -> TestResult {
        let catalog = test_catalog()?;

        // Only the ultraboost is flagged new; the rest keep catalog order.
        assert_eq!(
            sorted_ids(&catalog, SortKey::Newest),
            ["ultraboost", "stan-smith", "suede-classic"]
        );

        Ok(())
    }

    #[test]
    fn popularity_sort_uses_review_counts() -> TestResult {
        let catalog = test_catalog()?;

        assert_eq!(
            sorted_ids(&catalog, SortKey::Popularity),
            ["stan-smith", "suede-classic", "ultraboost"]
        );

        Ok(())
    }

    #[test]
    fn name_sorts_run_in_both_directions() -> TestResult {
        let catalog = test_catalog()?;

        assert_eq!(
            sorted_ids(&catalog, SortKey::NameAsc),
            ["stan-smith", "suede-classic", "ultraboost"]
        );

        assert_eq!(
            sorted_ids(&catalog, SortKey::NameDesc),
            ["ultraboost", "suede-classic", "stan-smith"]
        );

        Ok(())
    }

    #[test]
    fn sort_keys_round_trip_through_names() -> TestResult {
        for key in SortKey::ALL {
            assert_eq!(key.name().parse::<SortKey>()?, key);
        }

        Ok(())
    }

    #[test]
    fn unknown_sort_key_names_are_rejected() {
        assert!("price".parse::<SortKey>().is_err());
        assert!("cheapest".parse::<SortKey>().is_err());
    }
}
