//! Utils

use clap::Parser;

use crate::query::SortKey;

/// Arguments for the storefront examples
#[derive(Debug, Parser)]
pub struct StorefrontArgs {
    /// Fixture set to load the catalog, promotions and checkout rules from
    #[clap(short, long, default_value = "storefront")]
    pub fixture: String,

    /// Search text to match against product names and brands
    #[clap(short, long, default_value = "")]
    pub search: String,

    /// Sort order for the product listing
    #[clap(long, default_value = "relevance")]
    pub sort: SortKey,

    /// Promo code to apply at checkout
    #[clap(short, long)]
    pub promo: Option<String>,
}
