//! Fixtures
//!
//! YAML-backed fixture sets for the storefront: a products file becomes a
//! [`Catalog`], a promotions file a [`PromoCodeBook`] and a rules file the
//! [`CheckoutRules`]. Files live under a base path (`./fixtures` by default)
//! as `<category>/<name>.yml`, and every file loaded through one [`Fixture`]
//! must agree on a single currency.

use std::{fs, path::PathBuf};

use rusty_money::{Money, iso::Currency};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::{products::ProductsFixture, promotions::PromotionsFixture, rules::RulesFixture},
    products::Product,
    promos::{PromoCodeBook, PromoError},
    summary::{CheckoutRules, SummaryError},
};

pub mod products;
pub mod promotions;
pub mod rules;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading a fixture file
    #[error("Failed to read fixture file {}: {source}", path.display())]
    Io {
        /// Path of the fixture file
        path: PathBuf,

        /// Underlying IO error
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse fixture file {}: {source}", path.display())]
    Yaml {
        /// Path of the fixture file
        path: PathBuf,

        /// Underlying YAML error
        source: serde_norway::Error,
    },

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid review rating
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between fixture files
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No fixture files loaded yet
    #[error("No fixtures loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog construction error
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Promo book construction error
    #[error("Failed to register promo code: {0}")]
    Promo(#[from] PromoError),

    /// Checkout rules construction error
    #[error("Failed to build checkout rules: {0}")]
    Rules(#[from] SummaryError),
}

/// Fixture
///
/// Tracks the base path and pins the currency on the first file loaded, so a
/// set of loads cannot silently mix currencies.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Currency pinned by the first fixture file loaded
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            currency: None,
        }
    }

    /// Load a catalog from a products YAML fixture file
    ///
    /// File order becomes catalog order. Duplicate ids, out-of-range ratings
    /// and currency mismatches are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// product fails validation.
    pub fn load_catalog(&mut self, name: &str) -> Result<Catalog<'static>, FixtureError> {
        let fixture: ProductsFixture = self.load_document("products", name)?;

        let mut loaded = Vec::with_capacity(fixture.products.len());

        for product_fixture in fixture.products {
            let product: Product<'static> = product_fixture.try_into()?;

            self.check_currency(product.price.currency())?;
            loaded.push(product);
        }

        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        Ok(Catalog::with_products(loaded, currency)?)
    }

    /// Load a promo code book from a promotions YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// amount fails to parse or mismatches the fixture currency.
    pub fn load_promotions(&mut self, name: &str) -> Result<PromoCodeBook<'static>, FixtureError> {
        let fixture: PromotionsFixture = self.load_document("promotions", name)?;
        let entries = fixture.parsed_entries()?;

        for (_, _, currency) in &entries {
            self.check_currency(currency)?;
        }

        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;
        let mut book = PromoCodeBook::new(currency);

        for (code, minor_units, entry_currency) in entries {
            book.insert(&code, Money::from_minor(minor_units, entry_currency))?;
        }

        Ok(book)
    }

    /// Load checkout rules from a rules YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// rules fail validation or mismatch the fixture currency.
    pub fn load_rules(&mut self, name: &str) -> Result<CheckoutRules<'static>, FixtureError> {
        let fixture: RulesFixture = self.load_document("rules", name)?;
        let rules: CheckoutRules<'static> = fixture.try_into()?;

        self.check_currency(rules.currency())?;

        Ok(rules)
    }

    /// Load a complete fixture set (products, promotions and rules sharing
    /// the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<FixtureSet, FixtureError> {
        let mut fixture = Self::new();

        let catalog = fixture.load_catalog(name)?;
        let promos = fixture.load_promotions(name)?;
        let rules = fixture.load_rules(name)?;

        Ok(FixtureSet {
            catalog,
            promos,
            rules,
        })
    }

    /// Get the currency pinned by the loaded fixture files
    ///
    /// # Errors
    ///
    /// Returns an error if no fixture file has been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Read and parse one fixture document, reporting the file path on
    /// failure.
    fn load_document<T: DeserializeOwned>(
        &self,
        category: &str,
        name: &str,
    ) -> Result<T, FixtureError> {
        let path = self.base_path.join(category).join(format!("{name}.yml"));

        let contents = fs::read_to_string(&path).map_err(|source| FixtureError::Io {
            path: path.clone(),
            source,
        })?;

        serde_norway::from_str(&contents).map_err(|source| FixtureError::Yaml { path, source })
    }

    /// Pin the fixture currency on first use; later loads must match.
    fn check_currency(&mut self, found: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != found => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                found.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(found);
                Ok(())
            }
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete fixture set: catalog, promo codes and checkout rules loaded
/// from files sharing one name.
#[derive(Debug)]
pub struct FixtureSet {
    /// Product catalog, in file order
    pub catalog: Catalog<'static>,

    /// Promo code book
    pub promos: PromoCodeBook<'static>,

    /// Checkout rules
    pub rules: CheckoutRules<'static>,
}
