//! Wishlist
//!
//! An insertion-ordered set of saved products. Toggling is the primary
//! operation: saving a product that is already on the list removes it.

use crate::products::ProductKey;

/// Wishlist
#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    saved: Vec<ProductKey>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Wishlist::default()
    }

    /// Save the product, or remove it when already saved. Returns whether
    /// the product is saved afterwards.
    pub fn toggle(&mut self, product: ProductKey) -> bool {
        if self.remove(product) {
            return false;
        }

        self.saved.push(product);

        true
    }

    /// Whether the product is saved.
    #[must_use]
    pub fn contains(&self, product: ProductKey) -> bool {
        self.saved.contains(&product)
    }

    /// Remove the product. Returns whether it was saved.
    pub fn remove(&mut self, product: ProductKey) -> bool {
        let before = self.saved.len();
        self.saved.retain(|saved| *saved != product);

        self.saved.len() != before
    }

    /// Iterate over saved products, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = ProductKey> + '_ {
        self.saved.iter().copied()
    }

    /// The number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Remove every saved product.
    pub fn clear(&mut self) {
        self.saved.clear();
    }
}
