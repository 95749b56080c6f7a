//! Product Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{facets::FacetSet, fixtures::FixtureError, products::Product};

/// Wrapper for products in YAML
///
/// Products are an ordered list; their file order becomes the catalog order,
/// which every query treats as the relevance order.
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Ordered list of product fixtures
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Stable product id (e.g., "stan-smith")
    pub id: String,

    /// Product name
    pub name: String,

    /// Category (e.g., "Men")
    pub category: String,

    /// Brand (e.g., "Adidas")
    pub brand: String,

    /// Primary image URL
    #[serde(default)]
    pub image: String,

    /// Additional gallery image URLs
    #[serde(default)]
    pub gallery: Vec<String>,

    /// Product price (e.g., "90.00 USD")
    pub price: String,

    /// Pre-markdown price, when the product is on sale
    #[serde(default)]
    pub original_price: Option<String>,

    /// Advertised discount (e.g., "25%")
    #[serde(default)]
    pub discount_percent: Option<String>,

    /// Available sizes, in merchandising order
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Available colors
    #[serde(default)]
    pub colors: Vec<String>,

    /// Average review rating in `0..=5`
    #[serde(default)]
    pub rating: f64,

    /// Number of reviews behind the rating
    #[serde(default)]
    pub review_count: u32,

    /// Recently added to the catalog
    #[serde(default)]
    pub is_new: bool,

    /// Best-seller badge
    #[serde(default)]
    pub is_best_seller: bool,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;
        let price = Money::from_minor(minor_units, currency);

        let original_price = match fixture.original_price.as_deref() {
            None => None,
            Some(value) => {
                let (original_minor, original_currency) = parse_price(value)?;

                if original_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        original_currency.iso_alpha_code.to_string(),
                    ));
                }

                Some(Money::from_minor(original_minor, original_currency))
            }
        };

        let discount_percent = fixture
            .discount_percent
            .as_deref()
            .map(parse_percentage)
            .transpose()?;

        let rating = parse_rating(fixture.rating)?;

        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            category: fixture.category,
            brand: fixture.brand,
            image: fixture.image,
            gallery: SmallVec::from_vec(fixture.gallery),
            price,
            original_price,
            discount_percent,
            sizes: SmallVec::from_vec(fixture.sizes),
            colors: FacetSet::new(SmallVec::from_vec(fixture.colors)),
            rating,
            review_count: fixture.review_count,
            is_new: fixture.is_new,
            is_best_seller: fixture.is_best_seller,
        })
    }
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or if the value is invalid.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        // Parse as percentage (e.g., "15%" -> 0.15)
        let value = percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        // Convert from percentage to decimal (15 -> 0.15)
        Ok(Percentage::from(value / 100.0))
    } else {
        // Parse as decimal (e.g., "0.15" -> 0.15)
        let value = trimmed
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}

/// Parse a review rating into a `Decimal`, requiring `0..=5`
///
/// # Errors
///
/// Returns an error if the value cannot be represented or lies outside `0..=5`.
pub fn parse_rating(value: f64) -> Result<Decimal, FixtureError> {
    let rating =
        Decimal::from_f64(value).ok_or_else(|| FixtureError::InvalidRating(value.to_string()))?;

    if rating < Decimal::ZERO || rating > Decimal::new(5, 0) {
        return Err(FixtureError::InvalidRating(value.to_string()));
    }

    Ok(rating)
}
