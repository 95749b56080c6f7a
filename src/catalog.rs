//! Catalog
//!
//! An insertion-ordered, single-currency product store. Catalog order is the
//! "relevance" order: queries that do not re-sort return products in the
//! order they were inserted, and every sort breaks ties by it.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductKey};

/// Errors related to catalog construction or lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product's currency differs from the catalog currency (product id, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// A product id was inserted twice.
    #[error("Product id {0} already exists in the catalog")]
    DuplicateProduct(String),

    /// A product was not found by its string id.
    #[error("Product {0} not found")]
    ProductNotFound(String),
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    order: Vec<ProductKey>,
    ids: FxHashMap<String, ProductKey>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            products: SlotMap::with_key(),
            order: Vec::new(),
            ids: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from products, in the given order.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if a product's currency does not match or an
    /// id appears twice.
    pub fn with_products(
        products: impl IntoIterator<Item = Product<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Insert a product at the end of the catalog order.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the product's currency does not match the
    /// catalog currency, or its id is already present.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.id.clone(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if self.ids.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id.clone()));
        }

        let id = product.id.clone();
        let key = self.products.insert(product);

        self.order.push(key);
        self.ids.insert(id, key);

        Ok(key)
    }

    /// Get a product by key.
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Get a product by its string id.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::ProductNotFound` if the id is unknown.
    pub fn by_id(&self, id: &str) -> Result<&Product<'a>, CatalogError> {
        let key = self.key_of(id)?;

        self.products
            .get(key)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Get a product key by its string id.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::ProductNotFound` if the id is unknown.
    pub fn key_of(&self, id: &str) -> Result<ProductKey, CatalogError> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Iterate over products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.order
            .iter()
            .filter_map(|key| self.products.get(*key).map(|product| (*key, product)))
    }

    /// Iterate over product keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = ProductKey> + '_ {
        self.order.iter().copied()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The catalog currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
