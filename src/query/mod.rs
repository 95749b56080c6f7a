//! Catalog queries
//!
//! Runs a search/filter/sort pass over a [`Catalog`](crate::catalog::Catalog)
//! and returns the matching product keys. The pass is pure: the same catalog
//! and inputs always produce the same hits in the same order.
//!
//! Search is a case-insensitive substring match over a product's name,
//! category and brand; an empty or whitespace-only search matches every
//! product. Filters are ANDed per [`FilterState`]. Sorting is stable per
//! [`SortKey`], with [`SortKey::Relevance`] preserving catalog order.

pub mod filters;
pub mod sort;

use thiserror::Error;

pub use filters::{FilterError, FilterState, PriceBand};
pub use sort::{ParseSortKeyError, SortKey};

use crate::{
    catalog::Catalog,
    paging::Page,
    products::{Product, ProductKey},
};

/// Errors related to running queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The price band currency differs from the catalog currency
    /// (catalog currency, band currency).
    #[error("Catalog prices are in {0}, but the price band is in {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Run a query over the catalog, returning matching keys in sorted order.
///
/// # Errors
///
/// Returns a `QueryError` if the filter price band uses a different
/// currency than the catalog.
pub fn run<'a>(
    catalog: &Catalog<'a>,
    search: &str,
    filters: &FilterState<'a>,
    sort: SortKey,
) -> Result<Vec<ProductKey>, QueryError> {
    if let Some(band) = &filters.price_range
        && band.currency() != catalog.currency()
    {
        return Err(QueryError::CurrencyMismatch(
            catalog.currency().iso_alpha_code,
            band.currency().iso_alpha_code,
        ));
    }

    let needle = search.trim().to_lowercase();

    let mut hits: Vec<(ProductKey, &Product<'a>)> = catalog
        .iter()
        .filter(|(_, product)| matches_search(product, &needle) && filters.matches(product))
        .collect();

    sort::apply(&mut hits, sort);

    Ok(hits.into_iter().map(|(key, _)| key).collect())
}

/// Run a query and slice one page out of the hits.
///
/// Paging happens after filtering and sorting, so `page` 1 holds the first
/// `per_page` hits of the full result.
///
/// # Errors
///
/// Returns a `QueryError` if the filter price band uses a different
/// currency than the catalog.
pub fn run_page<'a>(
    catalog: &Catalog<'a>,
    search: &str,
    filters: &FilterState<'a>,
    sort: SortKey,
    page: usize,
    per_page: usize,
) -> Result<Page<ProductKey>, QueryError> {
    let hits = run(catalog, search, filters, sort)?;

    Ok(Page::slice(&hits, page, per_page))
}

fn matches_search(product: &Product<'_>, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    product.name.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
        || product.brand.to_lowercase().contains(needle)
}
