//! Donation request payload and the display helpers used to describe it in
//! notifications. Card numbers and CVVs never leave these types unmasked in
//! `Debug` output.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DISCOUNT_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonationFrequency {
    #[default]
    OneTime,
    Monthly,
}

impl DonationFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            DonationFrequency::Monthly => "Monthly Recurring",
            DonationFrequency::OneTime => "One-time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Stripe,
    Paypal,
    Orange,
    Lonestar,
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "Credit/Debit Card (Stripe)",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Orange => "Orange Money",
            PaymentMethod::Lonestar => "Lonestar Mobile Money",
            PaymentMethod::Other => "Online Payment",
        }
    }

    /// Card-based methods collect card details; the rest collect mobile money details.
    pub fn is_card(&self) -> bool {
        matches!(self, PaymentMethod::Stripe | PaymentMethod::Paypal)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl BillingInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.address, self.city, self.state, self.zip_code, self.country
        )
    }

    pub fn is_complete(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.address,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub cardholder_name: String,
}

impl CardDetails {
    /// Last four characters of the card number, or `XXXX` when there are fewer.
    pub fn last_four(&self) -> String {
        let chars: Vec<char> = self.card_number.chars().collect();
        if chars.len() < 4 {
            return "XXXX".to_string();
        }
        chars[chars.len() - 4..].iter().collect()
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &format!("****-****-****-{}", self.last_four()))
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .field("cardholder_name", &self.cardholder_name)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileMoneyDetails {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub account_name: String,
}

/// Payment instrument details. Every field is optional on the wire; the
/// variant is picked from which fields the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawPaymentInfo")]
pub enum PaymentInfo {
    Card(CardDetails),
    MobileMoney(MobileMoneyDetails),
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPaymentInfo {
    card_number: Option<String>,
    expiry_date: Option<String>,
    cvv: Option<String>,
    cardholder_name: Option<String>,
    phone_number: Option<String>,
    account_name: Option<String>,
}

impl From<RawPaymentInfo> for PaymentInfo {
    fn from(raw: RawPaymentInfo) -> Self {
        let has_card_fields = raw.card_number.is_some()
            || raw.expiry_date.is_some()
            || raw.cvv.is_some()
            || raw.cardholder_name.is_some();
        let has_mobile_fields = raw.phone_number.is_some() || raw.account_name.is_some();

        if has_mobile_fields && !has_card_fields {
            return PaymentInfo::MobileMoney(MobileMoneyDetails {
                phone_number: raw.phone_number.unwrap_or_default(),
                account_name: raw.account_name.unwrap_or_default(),
            });
        }
        PaymentInfo::Card(CardDetails {
            card_number: raw.card_number.unwrap_or_default(),
            expiry_date: raw.expiry_date.unwrap_or_default(),
            cvv: raw.cvv.unwrap_or_default(),
            cardholder_name: raw.cardholder_name.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub frequency: DonationFrequency,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub donor_info: Option<DonorInfo>,
    #[serde(default)]
    pub billing_info: Option<BillingInfo>,
    #[serde(default)]
    pub payment_info: Option<PaymentInfo>,
}

impl DonationRequest {
    pub fn is_discount_eligible(&self) -> bool {
        self.amount.map(|a| a >= DISCOUNT_THRESHOLD).unwrap_or(false)
    }

    /// Human-readable, masked description of the payment instrument.
    pub fn payment_details(&self) -> String {
        let Some(info) = &self.payment_info else {
            return "Not provided".to_string();
        };
        if self.payment_method.is_card() {
            let last_four = match info {
                PaymentInfo::Card(card) => card.last_four(),
                PaymentInfo::MobileMoney(_) => "XXXX".to_string(),
            };
            format!("Card ending in {}", last_four)
        } else {
            let phone = match info {
                PaymentInfo::MobileMoney(m) if !m.phone_number.is_empty() => {
                    mask_phone_number(&m.phone_number)
                }
                _ => "Not provided".to_string(),
            };
            format!("Phone: {}", phone)
        }
    }

    /// Last four card digits for the receipt, `XXXX` for non-card methods.
    pub fn receipt_last_four(&self) -> String {
        match (&self.payment_info, self.payment_method.is_card()) {
            (Some(PaymentInfo::Card(card)), true) => card.last_four(),
            _ => "XXXX".to_string(),
        }
    }
}

/// Dollar amount with two decimals, e.g. `$25.00`.
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Replace every digit that is immediately followed by four more digits with `*`.
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 4 {
        return "XXXX".to_string();
    }
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let followed_by_four = chars
                .get(i + 1..i + 5)
                .map(|next| next.iter().all(|n| n.is_ascii_digit()))
                .unwrap_or(false);
            if c.is_ascii_digit() && followed_by_four {
                '*'
            } else {
                *c
            }
        })
        .collect()
}
