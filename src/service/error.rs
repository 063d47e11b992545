use axum::http::StatusCode;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{error::HttpError, utils::currency::format_taka};

/// Why a payout request was turned down. Checked in declaration order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutRejectionReason {
    #[error("Payout amount must be a positive number")]
    InvalidAmount,

    #[error("Payout amount is below the minimum payout")]
    BelowMinimum,

    #[error("Payout amount exceeds the available balance")]
    InsufficientBalance,

    #[error("No payment method selected")]
    NoMethodSelected,

    #[error("Selected payment method is not configured")]
    MethodNotConfigured,
}

impl PayoutRejectionReason {
    /// Message for the affiliate, with the amounts that matter spelled out.
    pub fn user_message(&self, minimum_payout: &BigDecimal, available_balance: &BigDecimal) -> String {
        match self {
            PayoutRejectionReason::InvalidAmount => "Please enter a valid amount".to_string(),
            PayoutRejectionReason::BelowMinimum => {
                format!("Minimum payout amount is {}", format_taka(minimum_payout))
            }
            PayoutRejectionReason::InsufficientBalance => {
                format!("Insufficient balance. Available: {}", format_taka(available_balance))
            }
            PayoutRejectionReason::NoMethodSelected => "Please select a payment method".to_string(),
            PayoutRejectionReason::MethodNotConfigured => {
                "Please complete your payment method details first".to_string()
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Payout rejected: {0}")]
    PayoutRejected(#[from] PayoutRejectionReason),

    #[error("Invalid payout state transition: {0}")]
    InvalidPayoutTransition(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        HttpError::new(error.to_string(), error.status_code())
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::PayoutRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,

            ServiceError::InvalidPayoutTransition(_)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let rejected: ServiceError = PayoutRejectionReason::BelowMinimum.into();
        assert_eq!(rejected.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let http: HttpError = ServiceError::InvalidPayoutTransition("completed -> pending".into()).into();
        assert_eq!(http.status, StatusCode::BAD_REQUEST);
        assert!(http.message.contains("completed -> pending"));
    }

    #[test]
    fn test_rejection_reason_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&PayoutRejectionReason::MethodNotConfigured).unwrap(),
            "\"method_not_configured\""
        );
    }

    #[test]
    fn test_user_message_mentions_amounts() {
        let minimum = BigDecimal::from(1000);
        let available = BigDecimal::from(250);
        assert_eq!(
            PayoutRejectionReason::BelowMinimum.user_message(&minimum, &available),
            "Minimum payout amount is ৳1,000.00"
        );
        assert_eq!(
            PayoutRejectionReason::InsufficientBalance.user_message(&minimum, &available),
            "Insufficient balance. Available: ৳250.00"
        );
    }
}
