//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, LineItem},
    catalog::{Catalog, CatalogError},
    checkout::{
        CheckoutError, CheckoutSession, FieldIssue, PaymentDetails, PaymentForm, ShippingDetails,
        ShippingForm, Stage, Step,
    },
    facets::FacetSet,
    fixtures::{Fixture, FixtureError, FixtureSet},
    orders::{Order, OrderBook, OrderDraft, OrderError, OrderKey, OrderStatus},
    paging::{Page, PageInfo},
    products::{Product, ProductKey},
    promos::{PromoCodeBook, PromoError, PromoOutcome},
    query::{FilterError, FilterState, PriceBand, QueryError, SortKey},
    receipt::ReceiptError,
    summary::{CheckoutRules, OrderSummary, SummaryError, summarize},
    wishlist::Wishlist,
};
