//! Order summaries
//!
//! Reduces a [`Cart`] and an optional promo code to the five totals a
//! checkout displays: subtotal, shipping, tax, discount and total. The
//! calculation is pure; summarizing the same cart twice with the same code
//! produces the same summary, so a promo discount never stacks.
//!
//! Shipping is free once the subtotal reaches the free-shipping threshold
//! (inclusive), otherwise the flat rate applies. Tax is charged on the
//! subtotal only, never on shipping, and rounds half away from zero to the
//! nearest minor unit. The total is not floored at zero: a discount larger
//! than the rest of the order produces a negative total.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    promos::{PromoCodeBook, PromoOutcome},
};

/// Errors related to order summaries.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The rules or promo book use a different currency than the cart
    /// (cart currency, other currency).
    #[error("The cart is in {0}, but checkout was configured in {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// The shipping threshold and flat rate use different currencies
    /// (threshold currency, flat rate currency).
    #[error("Shipping threshold is in {0}, but the flat rate is in {1}")]
    MixedShippingCurrencies(&'static str, &'static str),

    /// A tax amount could not be represented.
    #[error("Unable to calculate tax")]
    TaxConversion,

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Money operation failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The checkout policy: tax rate, free-shipping threshold and flat
/// shipping rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutRules<'a> {
    tax_rate: Percentage,
    free_shipping_threshold: Money<'a, Currency>,
    flat_shipping_rate: Money<'a, Currency>,
}

impl<'a> CheckoutRules<'a> {
    /// Create a rule set.
    ///
    /// # Errors
    ///
    /// Returns a `SummaryError` if the threshold and flat rate use
    /// different currencies.
    pub fn new(
        tax_rate: Percentage,
        free_shipping_threshold: Money<'a, Currency>,
        flat_shipping_rate: Money<'a, Currency>,
    ) -> Result<Self, SummaryError> {
        if free_shipping_threshold.currency() != flat_shipping_rate.currency() {
            return Err(SummaryError::MixedShippingCurrencies(
                free_shipping_threshold.currency().iso_alpha_code,
                flat_shipping_rate.currency().iso_alpha_code,
            ));
        }

        Ok(CheckoutRules {
            tax_rate,
            free_shipping_threshold,
            flat_shipping_rate,
        })
    }

    /// The standard storefront policy: 8% tax, free shipping from 75 major
    /// units, and a flat rate of 5.99 otherwise.
    #[must_use]
    pub fn standard(currency: &'static Currency) -> Self {
        CheckoutRules {
            tax_rate: Percentage::from(Decimal::new(8, 2)),
            free_shipping_threshold: Money::from_minor(7500, currency),
            flat_shipping_rate: Money::from_minor(599, currency),
        }
    }

    /// The tax rate applied to the subtotal.
    #[must_use]
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// The subtotal from which shipping becomes free.
    #[must_use]
    pub fn free_shipping_threshold(&self) -> Money<'a, Currency> {
        self.free_shipping_threshold
    }

    /// The shipping charged below the free-shipping threshold.
    #[must_use]
    pub fn flat_shipping_rate(&self) -> Money<'a, Currency> {
        self.flat_shipping_rate
    }

    /// The rule currency.
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.free_shipping_threshold.currency()
    }
}

/// Order Summary
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary<'a> {
    subtotal: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    tax: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
    promo: PromoOutcome,
}

impl<'a> OrderSummary<'a> {
    /// The sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// The shipping charge; zero at or above the free-shipping threshold.
    #[must_use]
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// The tax charged on the subtotal.
    #[must_use]
    pub fn tax(&self) -> Money<'a, Currency> {
        self.tax
    }

    /// The promo discount; zero unless a code was applied.
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Subtotal plus shipping plus tax, minus the discount.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// How the promo code request resolved.
    #[must_use]
    pub fn promo(&self) -> &PromoOutcome {
        &self.promo
    }

    /// Whether the order qualified for free shipping.
    #[must_use]
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.to_minor_units() == 0
    }
}

/// Summarize a cart under the given rules, applying an optional promo code.
///
/// A missing or blank code resolves to [`PromoOutcome::NotRequested`]; an
/// unrecognised code resolves to [`PromoOutcome::Invalid`] with a zero
/// discount rather than an error.
///
/// # Errors
///
/// Returns a `SummaryError` if the rules or promo book currency differs
/// from the cart currency, or an amount cannot be represented.
pub fn summarize<'a>(
    cart: &Cart<'a>,
    promo_code: Option<&str>,
    rules: &CheckoutRules<'a>,
    promos: &PromoCodeBook<'a>,
) -> Result<OrderSummary<'a>, SummaryError> {
    let currency = cart.currency();

    if rules.currency() != currency {
        return Err(SummaryError::CurrencyMismatch(
            currency.iso_alpha_code,
            rules.currency().iso_alpha_code,
        ));
    }

    if promos.currency() != currency {
        return Err(SummaryError::CurrencyMismatch(
            currency.iso_alpha_code,
            promos.currency().iso_alpha_code,
        ));
    }

    let subtotal = cart.subtotal()?;

    let shipping = if subtotal.to_minor_units() >= rules.free_shipping_threshold.to_minor_units() {
        Money::from_minor(0, currency)
    } else {
        rules.flat_shipping_rate
    };

    let tax = tax_on(subtotal, rules.tax_rate)?;

    let (discount, promo) = match promo_code.map(str::trim).filter(|code| !code.is_empty()) {
        None => (Money::from_minor(0, currency), PromoOutcome::NotRequested),
        Some(code) => match promos.amount(code) {
            Some(amount) => (amount, PromoOutcome::Applied(PromoCodeBook::canonical(code))),
            None => (
                Money::from_minor(0, currency),
                PromoOutcome::Invalid(code.to_string()),
            ),
        },
    };

    let total = subtotal.add(shipping)?.add(tax)?.sub(discount)?;

    Ok(OrderSummary {
        subtotal,
        shipping,
        tax,
        discount,
        total,
        promo,
    })
}

/// The tax on an amount, rounded half away from zero to the nearest
/// minor unit.
fn tax_on<'a>(
    amount: Money<'a, Currency>,
    rate: Percentage,
) -> Result<Money<'a, Currency>, SummaryError> {
    let minor = Decimal::from_i64(amount.to_minor_units()).ok_or(SummaryError::TaxConversion)?;

    let tax = (rate * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(SummaryError::TaxConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(SummaryError::TaxConversion)?;

    Ok(Money::from_minor(tax, amount.currency()))
}
