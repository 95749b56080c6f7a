//! Promo codes
//!
//! A closed table of promo codes, each worth a fixed discount amount in the
//! book currency. Codes are canonicalized to trimmed uppercase, so lookups
//! are case-insensitive: `save20` and `SAVE20` name the same code. A lookup
//! miss is an expected outcome, not an error; [`PromoOutcome`] carries the
//! applied/invalid distinction through an order summary.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors related to promo code books.
#[derive(Debug, Error)]
pub enum PromoError {
    /// The code is already present in the book.
    #[error("Promo code {0:?} is already registered")]
    DuplicateCode(String),

    /// The discount amount uses a different currency than the book
    /// (code, book currency, amount currency).
    #[error("Promo code {0:?} is worth {2}, but the book is in {1}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// How a promo code request resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PromoOutcome {
    /// No code was entered
    #[default]
    NotRequested,

    /// The code was recognised and its discount applied
    Applied(String),

    /// The code was not recognised; no discount applied
    Invalid(String),
}

impl PromoOutcome {
    /// Whether a discount was applied.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, PromoOutcome::Applied(_))
    }

    /// Whether a code was entered but not recognised.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, PromoOutcome::Invalid(_))
    }

    /// The code involved, if one was entered.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            PromoOutcome::NotRequested => None,
            PromoOutcome::Applied(code) | PromoOutcome::Invalid(code) => Some(code),
        }
    }
}

/// Promo Code Book
#[derive(Debug, Clone)]
pub struct PromoCodeBook<'a> {
    codes: FxHashMap<String, Money<'a, Currency>>,
    currency: &'static Currency,
}

impl<'a> PromoCodeBook<'a> {
    /// Create an empty book in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        PromoCodeBook {
            codes: FxHashMap::default(),
            currency,
        }
    }

    /// The standard storefront codes: `SAVE20`, `WELCOME10` and `STUDENT15`,
    /// worth 20, 10 and 15 major units of the given currency.
    #[must_use]
    pub fn standard(currency: &'static Currency) -> Self {
        let mut codes = FxHashMap::default();

        codes.insert("SAVE20".to_string(), Money::from_minor(2000, currency));
        codes.insert("WELCOME10".to_string(), Money::from_minor(1000, currency));
        codes.insert("STUDENT15".to_string(), Money::from_minor(1500, currency));

        PromoCodeBook { codes, currency }
    }

    /// The canonical form of a code: trimmed and uppercased.
    #[must_use]
    pub fn canonical(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// Register a code worth a fixed discount amount.
    ///
    /// # Errors
    ///
    /// Returns a `PromoError` if the amount currency differs from the book
    /// currency, or the code is already registered.
    pub fn insert(
        &mut self,
        code: &str,
        amount: Money<'a, Currency>,
    ) -> Result<&mut Self, PromoError> {
        let canonical = Self::canonical(code);

        if amount.currency() != self.currency {
            return Err(PromoError::CurrencyMismatch(
                canonical,
                self.currency.iso_alpha_code,
                amount.currency().iso_alpha_code,
            ));
        }

        if self.codes.contains_key(&canonical) {
            return Err(PromoError::DuplicateCode(canonical));
        }

        self.codes.insert(canonical, amount);

        Ok(self)
    }

    /// The discount the code is worth, if the code is registered.
    #[must_use]
    pub fn amount(&self, code: &str) -> Option<Money<'a, Currency>> {
        self.codes.get(&Self::canonical(code)).copied()
    }

    /// Whether the code is registered.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(&Self::canonical(code))
    }

    /// The number of registered codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the book holds no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The book currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
