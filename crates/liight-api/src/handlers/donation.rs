//! `POST /api/send-donation`
//!
//! No payment processor is contacted. With sandbox mode on, a donation is
//! recorded by notifying the studio and sending the donor a receipt; with it
//! off the endpoint refuses donations outright.

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use liight_core::models::{format_amount, ApiMessage, DonationRequest};
use liight_core::AppError;
use std::sync::Arc;

pub const MISSING_FIELDS_MESSAGE: &str = "Donation amount and donor info are required";
pub const UNAVAILABLE_MESSAGE: &str = "Online donations are not available at this time";
pub const SUCCESS_MESSAGE: &str = "Donation processed successfully";
pub const FAILURE_MESSAGE: &str = "Failed to process donation";

fn check_request(request: &DonationRequest) -> Result<(), AppError> {
    let has_amount = request.amount.is_some_and(|a| a.is_finite() && a > 0.0);
    if !has_amount || request.donor_info.is_none() {
        return Err(AppError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
    }
    Ok(())
}

pub async fn send_donation(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<DonationRequest>,
) -> Result<Json<ApiMessage>, HttpAppError> {
    check_request(&request)?;

    if !state.config.donation_sandbox_mode() {
        return Err(AppError::Unavailable(UNAVAILABLE_MESSAGE.to_string()).into());
    }

    state
        .notifier
        .send_donation(&request)
        .await
        .map_err(|e| AppError::Notification {
            context: FAILURE_MESSAGE.to_string(),
            detail: e.to_string(),
        })?;

    tracing::info!(
        amount = %format_amount(request.amount.unwrap_or_default()),
        frequency = request.frequency.label(),
        payment_method = request.payment_method.label(),
        "Sandbox donation recorded"
    );

    Ok(Json(ApiMessage::ok(SUCCESS_MESSAGE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use liight_core::models::DonorInfo;

    #[test]
    fn test_amount_and_donor_required() {
        let mut request = DonationRequest {
            amount: Some(25.0),
            donor_info: Some(DonorInfo::default()),
            ..Default::default()
        };
        assert!(check_request(&request).is_ok());

        request.amount = Some(0.0);
        assert!(check_request(&request).is_err());

        request.amount = Some(f64::NAN);
        assert!(check_request(&request).is_err());

        request.amount = Some(10.0);
        request.donor_info = None;
        let err = check_request(&request).unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid input: {}", MISSING_FIELDS_MESSAGE));
    }
}
