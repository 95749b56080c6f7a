//! Placed orders
//!
//! Confirmed checkouts become [`Order`]s held in an [`OrderBook`]. Orders
//! are immutable snapshots of the cart, forms and summary at confirmation
//! time; only the fulfilment status moves, and only along the allowed
//! transitions. Ids are assigned sequentially from `ORD-1001`.

use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use std::fmt;
use thiserror::Error;

use crate::{
    cart::LineItem,
    checkout::{PaymentDetails, ShippingDetails},
    paging::Page,
    summary::OrderSummary,
};

new_key_type! {
    /// Key for orders stored in an [`OrderBook`]
    pub struct OrderKey;
}

/// Errors related to order books.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No order exists with the given id.
    #[error("No order with id {0:?}")]
    OrderNotFound(String),

    /// The requested status change is not an allowed transition.
    #[error("Orders cannot move from {from} to {to}")]
    InvalidTransition {
        /// The current status
        from: OrderStatus,
        /// The requested status
        to: OrderStatus,
    },

    /// The book holds no orders.
    #[error("No orders have been placed")]
    NoOrders,

    /// Money operation failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Where an order stands in fulfilment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Confirmed and being prepared
    Processing,

    /// Handed to the carrier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Cancelled before shipping
    Cancelled,
}

impl OrderStatus {
    /// Whether the status may move to `next`.
    ///
    /// Orders move `Processing` to `Shipped` to `Delivered`, and may be
    /// cancelled only while still processing.
    #[must_use]
    pub fn can_advance_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Processing => f.write_str("processing"),
            OrderStatus::Shipped => f.write_str("shipped"),
            OrderStatus::Delivered => f.write_str("delivered"),
            OrderStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Everything a confirmed checkout hands over to be placed as an order.
#[derive(Debug, Clone)]
pub struct OrderDraft<'a> {
    /// The cart lines at confirmation time
    pub lines: Vec<LineItem<'a>>,

    /// The validated shipping details
    pub shipping: ShippingDetails,

    /// The validated payment details
    pub payment: PaymentDetails,

    /// The summary shown at review
    pub summary: OrderSummary<'a>,
}

/// Order
#[derive(Debug, Clone)]
pub struct Order<'a> {
    id: String,
    sequence: u64,
    lines: Vec<LineItem<'a>>,
    shipping: ShippingDetails,
    payment: PaymentDetails,
    summary: OrderSummary<'a>,
    status: OrderStatus,
}

impl<'a> Order<'a> {
    /// The order id, such as `ORD-1001`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The sequence number the id was built from.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The snapshotted cart lines.
    #[must_use]
    pub fn lines(&self) -> &[LineItem<'a>] {
        &self.lines
    }

    /// The shipping details the order was placed with.
    #[must_use]
    pub fn shipping(&self) -> &ShippingDetails {
        &self.shipping
    }

    /// The payment details the order was placed with.
    #[must_use]
    pub fn payment(&self) -> &PaymentDetails {
        &self.payment
    }

    /// The summary the order was placed with.
    #[must_use]
    pub fn summary(&self) -> &OrderSummary<'a> {
        &self.summary
    }

    /// The fulfilment status.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }
}

/// Order Book
#[derive(Debug, Clone, Default)]
pub struct OrderBook<'a> {
    orders: SlotMap<OrderKey, Order<'a>>,
    placed: Vec<OrderKey>,
    ids: FxHashMap<String, OrderKey>,
    placed_count: u64,
}

/// The sequence number of the first order placed in a book.
const FIRST_SEQUENCE: u64 = 1001;

impl<'a> OrderBook<'a> {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        OrderBook::default()
    }

    /// Place a draft as a new order in `Processing` status, assigning the
    /// next sequential id.
    pub fn place(&mut self, draft: OrderDraft<'a>) -> OrderKey {
        let sequence = FIRST_SEQUENCE + self.placed_count;
        self.placed_count += 1;

        let id = format!("ORD-{sequence}");

        let key = self.orders.insert(Order {
            id: id.clone(),
            sequence,
            lines: draft.lines,
            shipping: draft.shipping,
            payment: draft.payment,
            summary: draft.summary,
            status: OrderStatus::Processing,
        });

        self.placed.push(key);
        self.ids.insert(id, key);

        key
    }

    /// The order behind a key, if it exists.
    #[must_use]
    pub fn get(&self, key: OrderKey) -> Option<&Order<'a>> {
        self.orders.get(key)
    }

    /// The order with the given id.
    ///
    /// # Errors
    ///
    /// Returns an `OrderError` if no order has the id.
    pub fn by_id(&self, id: &str) -> Result<&Order<'a>, OrderError> {
        self.ids
            .get(id)
            .and_then(|key| self.orders.get(*key))
            .ok_or_else(|| OrderError::OrderNotFound(id.to_string()))
    }

    /// Move the order with the given id to a new status.
    ///
    /// # Errors
    ///
    /// Returns an `OrderError` if no order has the id or the change is not
    /// an allowed transition.
    pub fn advance_status(&mut self, id: &str, to: OrderStatus) -> Result<(), OrderError> {
        let key = *self
            .ids
            .get(id)
            .ok_or_else(|| OrderError::OrderNotFound(id.to_string()))?;

        let order = self
            .orders
            .get_mut(key)
            .ok_or_else(|| OrderError::OrderNotFound(id.to_string()))?;

        if !order.status.can_advance_to(to) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to,
            });
        }

        order.status = to;

        Ok(())
    }

    /// One page of order history, newest first, optionally filtered to a
    /// single status.
    #[must_use]
    pub fn history(
        &self,
        status: Option<OrderStatus>,
        page: usize,
        per_page: usize,
    ) -> Page<OrderKey> {
        let keys: Vec<OrderKey> = self
            .placed
            .iter()
            .rev()
            .copied()
            .filter(|key| {
                self.orders
                    .get(*key)
                    .is_some_and(|order| status.is_none_or(|wanted| order.status == wanted))
            })
            .collect();

        Page::slice(&keys, page, per_page)
    }

    /// The sum of every order total, cancelled orders included.
    ///
    /// # Errors
    ///
    /// Returns an `OrderError` if the book is empty or the totals cannot
    /// be added.
    pub fn total_spent(&self) -> Result<Money<'a, Currency>, OrderError> {
        let mut totals = self
            .placed
            .iter()
            .filter_map(|key| self.orders.get(*key))
            .map(|order| order.summary().total());

        let first = totals.next().ok_or(OrderError::NoOrders)?;

        totals.try_fold(first, |acc, total| Ok(acc.add(total)?))
    }

    /// Iterate over orders in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (OrderKey, &Order<'a>)> {
        self.placed
            .iter()
            .filter_map(|key| self.orders.get(*key).map(|order| (*key, order)))
    }

    /// The number of placed orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Whether the book holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}
