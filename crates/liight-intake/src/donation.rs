//! Three-step donation wizard: amount, billing, payment.
//!
//! The wizard never talks to a payment processor. Whether it runs in sandbox
//! mode (any non-empty payment details accepted, outcome text says no payment
//! happened) comes from configuration.

use async_trait::async_trait;
use liight_core::models::{
    format_amount, ApiMessage, BillingInfo, CardDetails, DonationFrequency, DonationRequest,
    DonorInfo, MobileMoneyDetails, PaymentInfo, PaymentMethod,
};
use liight_core::Config;

use crate::client::ClientError;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 3;

#[async_trait]
pub trait DonationSubmitter: Send + Sync {
    async fn submit_donation(&self, request: &DonationRequest) -> Result<ApiMessage, ClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DonationError {
    #[error("Please complete step {0} before continuing")]
    Incomplete(u8),

    #[error("There was an error processing your donation. Please try again later.")]
    Request(#[from] ClientError),
}

/// Title and body shown once a donation went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationOutcome {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DonationWizard {
    sandbox_mode: bool,
    step: u8,
    pub amount: Option<f64>,
    pub frequency: DonationFrequency,
    pub payment_method: PaymentMethod,
    pub donor: DonorInfo,
    pub billing: BillingInfo,
    pub card: CardDetails,
    pub mobile_money: MobileMoneyDetails,
}

fn filled(value: &str) -> bool {
    !value.is_empty()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

impl DonationWizard {
    pub fn new(sandbox_mode: bool) -> Self {
        Self {
            sandbox_mode,
            step: FIRST_STEP,
            amount: None,
            frequency: DonationFrequency::default(),
            payment_method: PaymentMethod::default(),
            donor: DonorInfo::default(),
            billing: BillingInfo::default(),
            card: CardDetails::default(),
            mobile_money: MobileMoneyDetails::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.donation_sandbox_mode())
    }

    pub fn sandbox_mode(&self) -> bool {
        self.sandbox_mode
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_step_valid(&self, step: u8) -> bool {
        match step {
            1 => self.amount.map(|a| a > 0.0).unwrap_or(false),
            2 => self.billing.is_complete(),
            3 => self.payment_valid(),
            _ => false,
        }
    }

    fn payment_valid(&self) -> bool {
        let card = &self.card;
        let mobile = &self.mobile_money;
        match (self.payment_method.is_card(), self.sandbox_mode) {
            (true, true) => {
                filled(&card.card_number)
                    && filled(&card.expiry_date)
                    && filled(&card.cvv)
                    && filled(&card.cardholder_name)
            }
            (true, false) => {
                char_len(&card.card_number) >= 19
                    && char_len(&card.expiry_date) == 5
                    && char_len(&card.cvv) == 3
                    && filled(&card.cardholder_name)
            }
            (false, true) => filled(&mobile.phone_number) && filled(&mobile.account_name),
            (false, false) => {
                char_len(&mobile.phone_number) >= 10 && filled(&mobile.account_name)
            }
        }
    }

    /// Advance one step if the current step is valid. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.step >= LAST_STEP || !self.is_step_valid(self.step) {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn prev(&mut self) {
        if self.step > FIRST_STEP {
            self.step -= 1;
        }
    }

    pub fn build_request(&self) -> DonationRequest {
        let payment_info = if self.payment_method.is_card() {
            PaymentInfo::Card(self.card.clone())
        } else {
            PaymentInfo::MobileMoney(self.mobile_money.clone())
        };
        DonationRequest {
            amount: Some(self.amount.unwrap_or(0.0)),
            frequency: self.frequency,
            payment_method: self.payment_method,
            donor_info: Some(DonorInfo {
                name: Some(self.donor.name.clone().unwrap_or_default()),
                email: Some(self.donor.email.clone().unwrap_or_default()),
                message: Some(self.donor.message.clone().unwrap_or_default()),
            }),
            billing_info: Some(self.billing.clone()),
            payment_info: Some(payment_info),
        }
    }

    /// User-facing text for a completed donation.
    pub fn outcome(&self) -> DonationOutcome {
        let amount = format_amount(self.amount.unwrap_or(0.0));
        let high = self.build_request().is_discount_eligible();
        let email = self.donor.email.as_deref().filter(|e| !e.is_empty());

        if self.sandbox_mode {
            let mut message = format!(
                "This is a TEST donation of {}. No actual payment was processed.\n\n",
                amount
            );
            match email {
                Some(email) => {
                    message.push_str(&format!("A confirmation email has been sent to {}.", email))
                }
                None => message
                    .push_str("No email was provided, so no confirmation email was sent."),
            }
            if high {
                message.push_str("\n\nAs this was a donation of $100 or more, a sample discount code was included in the email.");
            }
            return DonationOutcome {
                title: "Test Donation Successful!".to_string(),
                message,
            };
        }

        let message = if high {
            let mut m = format!(
                "Thank you for your generous {} donation!\n\nAs a token of our appreciation, you've earned a 15% discount on your next design project with LIIGHT DESIGN INC.",
                amount
            );
            if email.is_some() {
                m.push_str("\n\nWe've sent you an email with your receipt and discount code.");
            }
            m
        } else {
            let mut m = format!(
                "Thank you for your generous {} donation! Your support means everything to us and helps bring our vision to life.",
                amount
            );
            if email.is_some() {
                m.push_str("\n\nWe've sent you an email with your donation receipt.");
            }
            m
        };
        DonationOutcome {
            title: "Thank You for Your Donation!".to_string(),
            message,
        }
    }

    /// Submit the donation once every step is valid. The wizard resets on success.
    pub async fn submit(
        &mut self,
        submitter: &dyn DonationSubmitter,
    ) -> Result<DonationOutcome, DonationError> {
        if let Some(step) = (FIRST_STEP..=LAST_STEP).find(|s| !self.is_step_valid(*s)) {
            return Err(DonationError::Incomplete(step));
        }

        let request = self.build_request();
        tracing::info!(
            sandbox = self.sandbox_mode,
            amount = %format_amount(self.amount.unwrap_or(0.0)),
            payment_method = ?self.payment_method,
            "Submitting donation"
        );
        submitter.submit_donation(&request).await.map_err(|e| {
            tracing::error!(error = %e, "Donation submission failed");
            DonationError::from(e)
        })?;

        let outcome = self.outcome();
        *self = DonationWizard::new(self.sandbox_mode);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSubmitter {
        requests: Mutex<Vec<DonationRequest>>,
    }

    #[async_trait]
    impl DonationSubmitter for RecordingSubmitter {
        async fn submit_donation(
            &self,
            request: &DonationRequest,
        ) -> Result<ApiMessage, ClientError> {
            self.requests.lock().expect("lock").push(request.clone());
            Ok(ApiMessage::ok("Donation processed successfully"))
        }
    }

    fn billing() -> BillingInfo {
        BillingInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            address: "1 Main St".into(),
            city: "Monrovia".into(),
            state: "MO".into(),
            zip_code: "1000".into(),
            country: "Liberia".into(),
        }
    }

    fn complete(sandbox: bool) -> DonationWizard {
        let mut wizard = DonationWizard::new(sandbox);
        wizard.amount = Some(50.0);
        wizard.billing = billing();
        wizard.card = CardDetails {
            card_number: "4242 4242 4242 4242".into(),
            expiry_date: "12/30".into(),
            cvv: "123".into(),
            cardholder_name: "Ada Lovelace".into(),
        };
        wizard
    }

    #[test]
    fn next_requires_valid_step() {
        let mut wizard = DonationWizard::new(true);
        assert!(!wizard.next());
        assert_eq!(wizard.step(), 1);

        wizard.amount = Some(0.0);
        assert!(!wizard.next());
        wizard.amount = Some(25.0);
        assert!(wizard.next());
        assert_eq!(wizard.step(), 2);

        assert!(!wizard.next());
        wizard.billing = billing();
        assert!(wizard.next());
        assert_eq!(wizard.step(), 3);
        assert!(!wizard.next());
    }

    #[test]
    fn prev_clamps_at_first_step() {
        let mut wizard = complete(true);
        wizard.next();
        wizard.prev();
        wizard.prev();
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn sandbox_accepts_any_non_empty_card() {
        let mut wizard = complete(true);
        wizard.card.card_number = "1".into();
        wizard.card.expiry_date = "x".into();
        wizard.card.cvv = "9".into();
        assert!(wizard.is_step_valid(3));
        wizard.card.cvv.clear();
        assert!(!wizard.is_step_valid(3));
    }

    #[test]
    fn strict_mode_checks_lengths() {
        let mut wizard = complete(false);
        assert!(wizard.is_step_valid(3));
        wizard.card.card_number = "4242424242424242".into();
        assert!(!wizard.is_step_valid(3));

        wizard.payment_method = PaymentMethod::Orange;
        wizard.mobile_money = MobileMoneyDetails {
            phone_number: "077123456".into(),
            account_name: "Ada".into(),
        };
        assert!(!wizard.is_step_valid(3));
        wizard.mobile_money.phone_number = "0771234567".into();
        assert!(wizard.is_step_valid(3));
    }

    #[test]
    fn request_carries_method_specific_payment_info() {
        let mut wizard = complete(true);
        assert!(matches!(
            wizard.build_request().payment_info,
            Some(PaymentInfo::Card(_))
        ));
        wizard.payment_method = PaymentMethod::Lonestar;
        assert!(matches!(
            wizard.build_request().payment_info,
            Some(PaymentInfo::MobileMoney(_))
        ));
    }

    #[test]
    fn sandbox_outcome_says_no_payment() {
        let mut wizard = complete(true);
        wizard.amount = Some(150.0);
        wizard.donor.email = Some("ada@example.com".into());
        let outcome = wizard.outcome();
        assert_eq!(outcome.title, "Test Donation Successful!");
        assert!(outcome.message.contains("TEST donation of $150.00"));
        assert!(outcome.message.contains("No actual payment was processed"));
        assert!(outcome.message.contains("sent to ada@example.com"));
        assert!(outcome.message.contains("discount code"));
    }

    #[test]
    fn live_outcome_mentions_receipt_only_with_email() {
        let wizard = complete(false);
        let outcome = wizard.outcome();
        assert_eq!(outcome.title, "Thank You for Your Donation!");
        assert!(outcome.message.starts_with("Thank you for your generous $50.00 donation!"));
        assert!(!outcome.message.contains("receipt"));
    }

    #[tokio::test]
    async fn submit_rejects_incomplete_wizard() {
        let mut wizard = complete(true);
        wizard.billing.city.clear();
        let submitter = RecordingSubmitter::default();
        let err = wizard.submit(&submitter).await.unwrap_err();
        assert!(matches!(err, DonationError::Incomplete(2)));
        assert!(submitter.requests.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn submit_sends_request_and_resets() {
        let mut wizard = complete(true);
        let submitter = RecordingSubmitter::default();
        let outcome = wizard.submit(&submitter).await.expect("submit");
        assert_eq!(outcome.title, "Test Donation Successful!");

        let requests = submitter.requests.lock().expect("lock");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, Some(50.0));
        assert_eq!(wizard.step(), 1);
        assert!(wizard.amount.is_none());
        assert!(wizard.sandbox_mode());
    }
}
