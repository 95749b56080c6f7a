//! Checkout forms
//!
//! Local validation for the shipping and payment forms. Validation collects
//! every field problem into a [`FieldIssue`] list instead of stopping at the
//! first, so a form can show all of its messages at once. A form that
//! validates cleanly produces an owned details snapshot; payment details
//! keep only the card holder, the last four digits and the expiry, never the
//! full card number or CVV.

use std::fmt;

/// A non-fatal validation message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// The field the message applies to
    pub field: &'static str,

    /// The message to show next to the field
    pub message: String,
}

impl FieldIssue {
    fn new(field: &'static str, message: &str) -> Self {
        FieldIssue {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Shipping Form
#[derive(Debug, Clone, Default)]
pub struct ShippingForm {
    /// Recipient name
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Street address
    pub address1: String,

    /// Apartment, suite or unit; optional
    pub address2: String,

    /// City
    pub city: String,

    /// Postal or ZIP code
    pub postal_code: String,

    /// Country
    pub country: String,
}

impl ShippingForm {
    /// Validate the form, returning a details snapshot or every field issue.
    ///
    /// # Errors
    ///
    /// Returns the full list of field issues when any field fails.
    pub fn validate(&self) -> Result<ShippingDetails, Vec<FieldIssue>> {
        let mut issues = Vec::new();

        require(&mut issues, "full_name", &self.full_name);
        require(&mut issues, "email", &self.email);
        require(&mut issues, "address1", &self.address1);
        require(&mut issues, "city", &self.city);
        require(&mut issues, "postal_code", &self.postal_code);
        require(&mut issues, "country", &self.country);

        let email = self.email.trim();

        if !email.is_empty() && !valid_email(email) {
            issues.push(FieldIssue::new("email", "must be a valid email address"));
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        let address2 = self.address2.trim();

        Ok(ShippingDetails {
            full_name: self.full_name.trim().to_string(),
            email: email.to_string(),
            address1: self.address1.trim().to_string(),
            address2: (!address2.is_empty()).then(|| address2.to_string()),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: self.country.trim().to_string(),
        })
    }
}

/// A validated shipping address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    /// Recipient name
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Street address
    pub address1: String,

    /// Apartment, suite or unit, when given
    pub address2: Option<String>,

    /// City
    pub city: String,

    /// Postal or ZIP code
    pub postal_code: String,

    /// Country
    pub country: String,
}

/// Payment Form
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    /// Name on the card
    pub card_holder: String,

    /// Card number; digits, optionally grouped with spaces or dashes
    pub card_number: String,

    /// Expiry in MM/YY format
    pub expiry: String,

    /// Card security code
    pub cvv: String,
}

impl PaymentForm {
    /// Validate the form, returning a details snapshot or every field issue.
    ///
    /// The snapshot keeps only the last four card digits; the full number
    /// and the CVV are dropped.
    ///
    /// # Errors
    ///
    /// Returns the full list of field issues when any field fails.
    pub fn validate(&self) -> Result<PaymentDetails, Vec<FieldIssue>> {
        let mut issues = Vec::new();

        require(&mut issues, "card_holder", &self.card_holder);

        let digits: String = self
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        if digits.is_empty() {
            issues.push(FieldIssue::new("card_number", "is required"));
        } else if !digits.bytes().all(|b| b.is_ascii_digit())
            || !(13..=19).contains(&digits.len())
        {
            issues.push(FieldIssue::new("card_number", "must be 13 to 19 digits"));
        }

        let expiry = self.expiry.trim();

        if expiry.is_empty() {
            issues.push(FieldIssue::new("expiry", "is required"));
        } else if !valid_expiry(expiry) {
            issues.push(FieldIssue::new("expiry", "must use MM/YY format"));
        }

        let cvv = self.cvv.trim();

        if cvv.is_empty() {
            issues.push(FieldIssue::new("cvv", "is required"));
        } else if !cvv.bytes().all(|b| b.is_ascii_digit()) || !(3..=4).contains(&cvv.len()) {
            issues.push(FieldIssue::new("cvv", "must be 3 or 4 digits"));
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        let card_last4 = digits
            .chars()
            .skip(digits.len().saturating_sub(4))
            .collect();

        Ok(PaymentDetails {
            card_holder: self.card_holder.trim().to_string(),
            card_last4,
            expiry: expiry.to_string(),
        })
    }
}

/// A validated payment method, holding no sensitive card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    /// Name on the card
    pub card_holder: String,

    /// The last four digits of the card number
    pub card_last4: String,

    /// Expiry in MM/YY format
    pub expiry: String,
}

fn require(issues: &mut Vec<FieldIssue>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        issues.push(FieldIssue::new(field, "is required"));
    }
}

fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };

    if month.len() != 2 || year.len() != 2 {
        return false;
    }

    if !month.bytes().all(|b| b.is_ascii_digit()) || !year.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    matches!(month.parse::<u8>(), Ok(1..=12))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn filled_shipping_form() -> ShippingForm {
        ShippingForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            address1: "1 Analytical Way".to_string(),
            address2: String::new(),
            city: "London".to_string(),
            postal_code: "EC1A 1BB".to_string(),
            country: "United Kingdom".to_string(),
        }
    }

    fn filled_payment_form() -> PaymentForm {
        PaymentForm {
            card_holder: "Ada Lovelace".to_string(),
            card_number: "4242 4242 4242 4242".to_string(),
            expiry: "12/27".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn a_complete_shipping_form_produces_trimmed_details() -> TestResult {
        let mut form = filled_shipping_form();
        form.full_name = "  Ada Lovelace  ".to_string();
        form.address2 = "  Flat 2  ".to_string();

        let details = form.validate().map_err(|issues| format!("{issues:?}"))?;

        assert_eq!(details.full_name, "Ada Lovelace");
        assert_eq!(details.address2.as_deref(), Some("Flat 2"));

        Ok(())
    }

    #[test]
    fn a_blank_optional_address_line_becomes_none() -> TestResult {
        let details = filled_shipping_form()
            .validate()
            .map_err(|issues| format!("{issues:?}"))?;

        assert_eq!(details.address2, None);

        Ok(())
    }

    #[test]
    fn an_empty_shipping_form_reports_every_required_field() {
        let issues = match ShippingForm::default().validate() {
            Err(issues) => issues,
            Ok(details) => panic!("expected issues, got {details:?}"),
        };

        let fields: Vec<_> = issues.iter().map(|issue| issue.field).collect();

        assert_eq!(
            fields,
            ["full_name", "email", "address1", "city", "postal_code", "country"]
        );

        assert!(issues.iter().all(|issue| issue.message == "is required"));
    }

    #[test]
    fn malformed_emails_are_flagged() {
        for email in ["ada", "ada@", "@example.com", "ada@example"] {
            let mut form = filled_shipping_form();
            form.email = email.to_string();

            let issues = match form.validate() {
                Err(issues) => issues,
                Ok(details) => panic!("expected issues for {email:?}, got {details:?}"),
            };

            assert_eq!(issues.len(), 1);
            assert_eq!(
                issues.first().map(|issue| issue.field),
                Some("email"),
                "email {email:?} should be flagged"
            );
        }
    }

    #[test]
    fn payment_details_keep_only_the_last_four_digits() -> TestResult {
        let details = filled_payment_form()
            .validate()
            .map_err(|issues| format!("{issues:?}"))?;

        assert_eq!(details.card_holder, "Ada Lovelace");
        assert_eq!(details.card_last4, "4242");
        assert_eq!(details.expiry, "12/27");

        Ok(())
    }

    #[test]
    fn card_numbers_accept_spaces_and_dashes() -> TestResult {
        let mut form = filled_payment_form();
        form.card_number = "4242-4242-4242-4242".to_string();

        let details = form.validate().map_err(|issues| format!("{issues:?}"))?;

        assert_eq!(details.card_last4, "4242");

        Ok(())
    }

    #[test]
    fn short_and_non_numeric_card_numbers_are_flagged() {
        for number in ["4242", "4242 4242 4242 424x", "42424242424242424242"] {
            let mut form = filled_payment_form();
            form.card_number = number.to_string();

            let issues = match form.validate() {
                Err(issues) => issues,
                Ok(details) => panic!("expected issues for {number:?}, got {details:?}"),
            };

            assert_eq!(issues.first().map(|issue| issue.field), Some("card_number"));
        }
    }

    #[test]
    fn expiries_must_be_real_months_in_mm_yy_format() {
        for expiry in ["1227", "13/27", "00/27", "1/27", "12/277"] {
            let mut form = filled_payment_form();
            form.expiry = expiry.to_string();

            let issues = match form.validate() {
                Err(issues) => issues,
                Ok(details) => panic!("expected issues for {expiry:?}, got {details:?}"),
            };

            assert_eq!(issues.first().map(|issue| issue.field), Some("expiry"));
        }
    }

    #[test]
    fn an_empty_payment_form_reports_every_field_at_once() {
        let issues = match PaymentForm::default().validate() {
            Err(issues) => issues,
            Ok(details) => panic!("expected issues, got {details:?}"),
        };

        let fields: Vec<_> = issues.iter().map(|issue| issue.field).collect();

        assert_eq!(fields, ["card_holder", "card_number", "expiry", "cvv"]);
    }

    #[test]
    fn issues_render_with_their_field_name() {
        let issue = FieldIssue {
            field: "email",
            message: "must be a valid email address".to_string(),
        };

        assert_eq!(issue.to_string(), "email: must be a valid email address");
    }
}
