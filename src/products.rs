//! Products

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::facets::FacetSet;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product
///
/// Immutable for the duration of a session; `price` is the current selling
/// price and `original_price`, when present, is the pre-markdown price used
/// for savings badges.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Stable string id (e.g. `"stan-smith"`), unique within a catalog
    pub id: String,

    /// Display name
    pub name: String,

    /// Category (e.g. `"Men"`)
    pub category: String,

    /// Brand (e.g. `"Adidas"`)
    pub brand: String,

    /// Primary image URL
    pub image: String,

    /// Additional gallery image URLs
    pub gallery: SmallVec<[String; 4]>,

    /// Current selling price
    pub price: Money<'a, Currency>,

    /// Pre-markdown price, when the product is on sale
    pub original_price: Option<Money<'a, Currency>>,

    /// Advertised discount as a fraction (e.g. 0.30 for a "30% off" badge)
    pub discount_percent: Option<Percentage>,

    /// Available sizes, in merchandising order
    pub sizes: SmallVec<[String; 6]>,

    /// Available colors
    pub colors: FacetSet,

    /// Average review rating in `0..=5`
    pub rating: Decimal,

    /// Number of reviews behind the rating
    pub review_count: u32,

    /// Recently added to the catalog
    pub is_new: bool,

    /// Best-seller badge
    pub is_best_seller: bool,
}

impl<'a> Product<'a> {
    /// Creates a product with the required fields and empty optional ones.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        brand: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            brand: brand.into(),
            image: String::new(),
            gallery: SmallVec::new(),
            price,
            original_price: None,
            discount_percent: None,
            sizes: SmallVec::new(),
            colors: FacetSet::empty(),
            rating: Decimal::ZERO,
            review_count: 0,
            is_new: false,
            is_best_seller: false,
        }
    }

    /// The advertised discount in percent points (e.g. 30 for a 30% badge).
    pub fn discount_points(&self) -> Option<Decimal> {
        self.discount_percent
            .map(|percent| ((percent * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(0))
    }
}
