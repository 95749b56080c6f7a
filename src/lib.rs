//! Vitrine
//!
//! Vitrine is an embeddable storefront engine for product catalogs, carts, checkout and order tracking, written in Rust.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod facets;
pub mod fixtures;
pub mod orders;
pub mod paging;
pub mod prelude;
pub mod products;
pub mod promos;
pub mod query;
pub mod receipt;
pub mod summary;
pub mod utils;
pub mod wishlist;
