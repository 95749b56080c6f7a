//! Checkout sequencing
//!
//! Drives a checkout through its three steps: shipping, payment and review,
//! after which the session is confirmed and frozen. The session enforces
//! ordering only; field validation lives in [`forms`] and the money sums in
//! [`crate::summary`].
//!
//! Completing a step records it and moves the session to the next step.
//! Completion is idempotent: a step is recorded once no matter how often it
//! is resubmitted. Navigation back is only allowed onto steps that have
//! already been completed, so the review step is unreachable until both
//! forms are done. Confirming is only possible at review and produces an
//! [`OrderDraft`] snapshot of the cart, forms and summary.

pub mod forms;

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

pub use forms::{FieldIssue, PaymentDetails, PaymentForm, ShippingDetails, ShippingForm};

use crate::{cart::Cart, orders::OrderDraft, summary::OrderSummary};

/// Errors related to checkout sequencing.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A step was submitted before an earlier step was completed.
    #[error("Cannot move to the {step} step before completing the {missing} step")]
    StepNotReady {
        /// The step that was submitted
        step: Step,
        /// The earlier step still outstanding
        missing: Step,
    },

    /// Navigation onto a step that has not been completed.
    #[error("The {0} step has not been completed")]
    StepNotCompleted(Step),

    /// Confirmation attempted away from the review step.
    #[error("Orders can only be confirmed from the review step")]
    NotAtReview,

    /// The session has already produced its order.
    #[error("The checkout has already been confirmed")]
    AlreadyConfirmed,
}

/// A checkout step, numbered 1 to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// Shipping address entry
    Shipping,

    /// Payment method entry
    Payment,

    /// Final review of the order
    Review,
}

impl Step {
    /// Every step, in checkout order.
    pub const ALL: [Step; 3] = [Step::Shipping, Step::Payment, Step::Review];

    /// The 1-based step number.
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            Step::Shipping => 1,
            Step::Payment => 2,
            Step::Review => 3,
        }
    }

    /// The step with the given 1-based number, if any.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Step> {
        match number {
            1 => Some(Step::Shipping),
            2 => Some(Step::Payment),
            3 => Some(Step::Review),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Shipping => f.write_str("shipping"),
            Step::Payment => f.write_str("payment"),
            Step::Review => f.write_str("review"),
        }
    }
}

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Working through the given step
    InProgress(Step),

    /// The order has been confirmed; the session is frozen
    Confirmed,
}

/// Checkout Session
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    stage: Stage,
    completed: SmallVec<[Step; 3]>,
    shipping: Option<ShippingDetails>,
    payment: Option<PaymentDetails>,
}

impl CheckoutSession {
    /// Start a session at the shipping step with nothing completed.
    #[must_use]
    pub fn new() -> Self {
        CheckoutSession {
            stage: Stage::InProgress(Step::Shipping),
            completed: SmallVec::new(),
            shipping: None,
            payment: None,
        }
    }

    /// The session stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The step currently in progress; `None` once confirmed.
    #[must_use]
    pub fn current_step(&self) -> Option<Step> {
        match self.stage {
            Stage::InProgress(step) => Some(step),
            Stage::Confirmed => None,
        }
    }

    /// Whether the session has produced its order.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.stage == Stage::Confirmed
    }

    /// Whether a step has been completed.
    #[must_use]
    pub fn is_completed(&self, step: Step) -> bool {
        self.completed.contains(&step)
    }

    /// The completed steps, in checkout order.
    #[must_use]
    pub fn completed_steps(&self) -> &[Step] {
        &self.completed
    }

    /// The validated shipping details, once the shipping step is done.
    #[must_use]
    pub fn shipping(&self) -> Option<&ShippingDetails> {
        self.shipping.as_ref()
    }

    /// The validated payment details, once the payment step is done.
    #[must_use]
    pub fn payment(&self) -> Option<&PaymentDetails> {
        self.payment.as_ref()
    }

    /// Submit the shipping step and move on to payment.
    ///
    /// Resubmitting replaces the stored details and returns to the payment
    /// step; the completed set is unchanged.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if the session is already confirmed.
    pub fn complete_shipping(&mut self, details: ShippingDetails) -> Result<(), CheckoutError> {
        self.ensure_not_confirmed()?;

        self.shipping = Some(details);
        self.mark_completed(Step::Shipping);
        self.stage = Stage::InProgress(Step::Payment);

        Ok(())
    }

    /// Submit the payment step and move on to review.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if the shipping step has not been completed
    /// or the session is already confirmed.
    pub fn complete_payment(&mut self, details: PaymentDetails) -> Result<(), CheckoutError> {
        self.ensure_not_confirmed()?;

        if !self.is_completed(Step::Shipping) {
            return Err(CheckoutError::StepNotReady {
                step: Step::Payment,
                missing: Step::Shipping,
            });
        }

        self.payment = Some(details);
        self.mark_completed(Step::Payment);
        self.stage = Stage::InProgress(Step::Review);

        Ok(())
    }

    /// Navigate to a previously completed step.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if the step has not been completed or the
    /// session is already confirmed.
    pub fn go_to_step(&mut self, step: Step) -> Result<(), CheckoutError> {
        self.ensure_not_confirmed()?;

        if !self.is_completed(step) {
            return Err(CheckoutError::StepNotCompleted(step));
        }

        self.stage = Stage::InProgress(step);

        Ok(())
    }

    /// Confirm the order from the review step, freezing the session.
    ///
    /// The returned draft snapshots the cart lines, the validated forms and
    /// the summary; later changes to the cart never touch it.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if the session is not at the review step or
    /// has already been confirmed.
    pub fn confirm_order<'a>(
        &mut self,
        cart: &Cart<'a>,
        summary: OrderSummary<'a>,
    ) -> Result<OrderDraft<'a>, CheckoutError> {
        match self.stage {
            Stage::Confirmed => return Err(CheckoutError::AlreadyConfirmed),
            Stage::InProgress(Step::Review) => {}
            Stage::InProgress(_) => return Err(CheckoutError::NotAtReview),
        }

        let Some(shipping) = self.shipping.clone() else {
            return Err(CheckoutError::StepNotCompleted(Step::Shipping));
        };

        let Some(payment) = self.payment.clone() else {
            return Err(CheckoutError::StepNotCompleted(Step::Payment));
        };

        self.mark_completed(Step::Review);
        self.stage = Stage::Confirmed;

        Ok(OrderDraft {
            lines: cart.iter().cloned().collect(),
            shipping,
            payment,
            summary,
        })
    }

    fn ensure_not_confirmed(&self) -> Result<(), CheckoutError> {
        if self.is_confirmed() {
            return Err(CheckoutError::AlreadyConfirmed);
        }

        Ok(())
    }

    fn mark_completed(&mut self, step: Step) {
        if !self.completed.contains(&step) {
            self.completed.push(step);
        }
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;
    use crate::{
        promos::PromoCodeBook,
        summary::{CheckoutRules, summarize},
    };

    fn shipping_details() -> ShippingDetails {
        ShippingDetails {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address1: "1 Analytical Way".to_string(),
            address2: None,
            city: "London".to_string(),
            postal_code: "EC1A 1BB".to_string(),
            country: "United Kingdom".to_string(),
        }
    }

    fn payment_details() -> PaymentDetails {
        PaymentDetails {
            card_holder: "Ada Lovelace".to_string(),
            card_last4: "4242".to_string(),
            expiry: "12/27".to_string(),
        }
    }

    fn confirmable_session() -> Result<CheckoutSession, CheckoutError> {
        let mut session = CheckoutSession::new();
        session.complete_shipping(shipping_details())?;
        session.complete_payment(payment_details())?;
        Ok(session)
    }

    #[test]
    fn a_fresh_session_starts_at_shipping_with_nothing_done() {
        let session = CheckoutSession::new();

        assert_eq!(session.stage(), Stage::InProgress(Step::Shipping));
        assert_eq!(session.current_step(), Some(Step::Shipping));
        assert!(session.completed_steps().is_empty());
        assert!(!session.is_confirmed());
    }

    #[test]
    fn completing_steps_advances_in_order() -> TestResult {
        let mut session = CheckoutSession::new();

        session.complete_shipping(shipping_details())?;
        assert_eq!(session.current_step(), Some(Step::Payment));
        assert!(session.is_completed(Step::Shipping));

        session.complete_payment(payment_details())?;
        assert_eq!(session.current_step(), Some(Step::Review));
        assert_eq!(session.completed_steps(), [Step::Shipping, Step::Payment]);

        Ok(())
    }

    #[test]
    fn payment_cannot_be_submitted_before_shipping() {
        let mut session = CheckoutSession::new();

        let result = session.complete_payment(payment_details());

        assert!(matches!(
            result,
            Err(CheckoutError::StepNotReady {
                step: Step::Payment,
                missing: Step::Shipping,
            })
        ));
    }

    #[test]
    fn review_is_unreachable_until_both_forms_are_done() -> TestResult {
        let mut session = CheckoutSession::new();

        assert!(matches!(
            session.go_to_step(Step::Review),
            Err(CheckoutError::StepNotCompleted(Step::Review))
        ));

        session.complete_shipping(shipping_details())?;

        assert!(matches!(
            session.go_to_step(Step::Review),
            Err(CheckoutError::StepNotCompleted(Step::Review))
        ));

        Ok(())
    }

    #[test]
    fn completed_steps_can_be_revisited_and_resubmitted() -> TestResult {
        let mut session = confirmable_session()?;

        session.go_to_step(Step::Shipping)?;
        assert_eq!(session.current_step(), Some(Step::Shipping));

        let mut updated = shipping_details();
        updated.city = "Cambridge".to_string();
        session.complete_shipping(updated)?;

        assert_eq!(session.current_step(), Some(Step::Payment));
        assert_eq!(session.completed_steps(), [Step::Shipping, Step::Payment]);
        assert_eq!(
            session.shipping().map(|details| details.city.as_str()),
            Some("Cambridge")
        );

        Ok(())
    }

    #[test]
    fn resubmitting_a_step_records_it_once() -> TestResult {
        let mut session = CheckoutSession::new();

        session.complete_shipping(shipping_details())?;
        session.go_to_step(Step::Shipping)?;
        session.complete_shipping(shipping_details())?;

        assert_eq!(session.completed_steps(), [Step::Shipping]);

        Ok(())
    }

    #[test]
    fn orders_can_only_be_confirmed_at_review() -> TestResult {
        let cart = Cart::new(USD);
        let summary = summarize(
            &cart,
            None,
            &CheckoutRules::standard(USD),
            &PromoCodeBook::standard(USD),
        )?;

        let mut session = CheckoutSession::new();
        session.complete_shipping(shipping_details())?;

        let result = session.confirm_order(&cart, summary);

        assert!(matches!(result, Err(CheckoutError::NotAtReview)));

        Ok(())
    }

    #[test]
    fn confirming_freezes_the_session_and_completes_every_step() -> TestResult {
        let cart = Cart::new(USD);
        let summary = summarize(
            &cart,
            None,
            &CheckoutRules::standard(USD),
            &PromoCodeBook::standard(USD),
        )?;

        let mut session = confirmable_session()?;

        let draft = session.confirm_order(&cart, summary.clone())?;

        assert!(session.is_confirmed());
        assert_eq!(session.current_step(), None);
        assert_eq!(
            session.completed_steps(),
            [Step::Shipping, Step::Payment, Step::Review]
        );
        assert_eq!(draft.summary, summary);
        assert_eq!(draft.shipping.full_name, "Ada Lovelace");

        assert!(matches!(
            session.confirm_order(&cart, summary),
            Err(CheckoutError::AlreadyConfirmed)
        ));

        assert!(matches!(
            session.go_to_step(Step::Shipping),
            Err(CheckoutError::AlreadyConfirmed)
        ));

        Ok(())
    }

    #[test]
    fn drafts_snapshot_the_cart_at_confirmation_time() -> TestResult {
        let catalog = crate::catalog::Catalog::with_products(
            [crate::products::Product::new(
                "stan-smith",
                "Stan Smith Classic Sneakers",
                "Men",
                "Adidas",
                Money::from_minor(9000, USD),
            )],
            USD,
        )?;

        let mut cart = Cart::new(USD);
        cart.add_product(
            catalog.key_of("stan-smith")?,
            catalog.by_id("stan-smith")?,
            2,
            Some("9"),
            None,
        )?;

        let summary = summarize(
            &cart,
            None,
            &CheckoutRules::standard(USD),
            &PromoCodeBook::standard(USD),
        )?;

        let mut session = confirmable_session()?;
        let draft = session.confirm_order(&cart, summary)?;

        cart.clear();

        assert_eq!(draft.lines.len(), 1);
        assert_eq!(
            draft.lines.first().map(crate::cart::LineItem::quantity),
            Some(2)
        );

        Ok(())
    }

    #[test]
    fn step_numbers_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }

        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(4), None);
    }
}
