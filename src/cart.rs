//! Shopping cart
//!
//! An ordered collection of [`LineItem`]s in a single currency. Lines
//! snapshot the product id and unit price at the moment they are added, so
//! later catalog edits never change what a cart charges. Adding a product
//! that is already in the cart with the same size and color merges into the
//! existing line instead of appending a duplicate.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::products::{Product, ProductKey};

/// Errors related to carts.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line uses a different currency than the cart
    /// (line index, cart currency, line currency).
    #[error("Line {0} uses currency {2}, but the cart is in {1}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// A line was created with a quantity of zero.
    #[error("Line quantity must be at least 1")]
    ZeroQuantity,

    /// No line exists at the given index.
    #[error("No line at index {0}")]
    LineNotFound(usize),

    /// A quantity or amount exceeded the representable range.
    #[error("Amount out of range")]
    Overflow,

    /// Money operation failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One cart line: a product at a fixed unit price, with optional size and
/// color choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem<'a> {
    product: ProductKey,
    product_id: String,
    size: Option<String>,
    color: Option<String>,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// Create a line without size or color choices.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the quantity is zero.
    pub fn new(
        product: ProductKey,
        product_id: impl Into<String>,
        quantity: u32,
        unit_price: Money<'a, Currency>,
    ) -> Result<Self, CartError> {
        Self::with_options(product, product_id, quantity, unit_price, None, None)
    }

    /// Create a line with optional size and color choices.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the quantity is zero.
    pub fn with_options(
        product: ProductKey,
        product_id: impl Into<String>,
        quantity: u32,
        unit_price: Money<'a, Currency>,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        Ok(LineItem {
            product,
            product_id: product_id.into(),
            size: size.map(ToString::to_string),
            color: color.map(ToString::to_string),
            quantity,
            unit_price,
        })
    }

    /// The catalog key of the product.
    #[must_use]
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// The product id snapshotted when the line was created.
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// The chosen size, if any.
    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// The chosen color, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// The line quantity.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The unit price snapshotted when the line was created.
    #[must_use]
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// The unit price multiplied by the quantity.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the multiplication overflows.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, CartError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(CartError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }

    fn merges_with(&self, other: &LineItem<'a>) -> bool {
        self.product == other.product && self.size == other.size && self.color == other.color
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add a line, merging into an existing line when the product, size and
    /// color all match. Returns the index of the line the quantity landed in.
    ///
    /// A merged line keeps the unit price it was first added with.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the line currency differs from the cart
    /// currency, or if merging would overflow the quantity.
    pub fn add(&mut self, line: LineItem<'a>) -> Result<usize, CartError> {
        if line.unit_price.currency() != self.currency {
            return Err(CartError::CurrencyMismatch(
                self.lines.len(),
                self.currency.iso_alpha_code,
                line.unit_price.currency().iso_alpha_code,
            ));
        }

        if let Some((index, existing)) = self
            .lines
            .iter_mut()
            .enumerate()
            .find(|(_, existing)| existing.merges_with(&line))
        {
            existing.quantity = existing
                .quantity
                .checked_add(line.quantity)
                .ok_or(CartError::Overflow)?;

            return Ok(index);
        }

        self.lines.push(line);

        Ok(self.lines.len() - 1)
    }

    /// Add a catalog product, snapshotting its id and current price.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the quantity is zero or the product currency
    /// differs from the cart currency.
    pub fn add_product(
        &mut self,
        key: ProductKey,
        product: &Product<'a>,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<usize, CartError> {
        let line =
            LineItem::with_options(key, &product.id, quantity, product.price, size, color)?;

        self.add(line)
    }

    /// Set the quantity of a line; a quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if no line exists at the index.
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove_line(index)?;
            return Ok(());
        }

        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineNotFound(index))?;

        line.quantity = quantity;

        Ok(())
    }

    /// Remove and return the line at the index.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if no line exists at the index.
    pub fn remove_line(&mut self, index: usize) -> Result<LineItem<'a>, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound(index));
        }

        Ok(self.lines.remove(index))
    }

    /// The line at the index, if any.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&LineItem<'a>> {
        self.lines.get(index)
    }

    /// Iterate over the lines in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.lines.iter()
    }

    /// The number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The cart currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The total quantity across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The sum of all line totals. An empty cart subtotals to zero in the
    /// cart currency.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line total overflows or the amounts cannot
    /// be added.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        self.lines
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                Ok(acc.add(line.line_total()?)?)
            })
    }
}
