// dtos/payoutdtos.rs
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::{
    models::{
        affiliatemodel::{AffiliateAccount, PaymentMethod},
        payoutmodel::{PayoutRequest, PayoutStatus},
    },
    service::error::PayoutRejectionReason,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequestDto {
    pub pending_earnings: BigDecimal,
    #[serde(default)]
    pub minimum_payout: Option<BigDecimal>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponseDto {
    pub success: bool,
    pub eligible: bool,
    pub minimum_payout: BigDecimal,
    /// How much more has to be earned before a payout unlocks; zero once eligible.
    pub shortfall: BigDecimal,
}

/// Payout request as submitted from the payout page.
///
/// `account` carries the current payment details; without it the caller
/// lists the configured methods and the affiliate id directly.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PayoutValidationRequestDto {
    /// Raw form input: a number, numeric text, or nothing at all.
    #[serde(default)]
    pub amount: Option<Value>,
    pub available_balance: BigDecimal,
    #[serde(default)]
    pub minimum_payout: Option<BigDecimal>,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub account: Option<AffiliateAccount>,
    #[serde(default)]
    pub configured_methods: Vec<PaymentMethod>,

    #[validate(length(min = 1, message = "affiliateId cannot be empty"))]
    #[serde(default)]
    pub affiliate_id: Option<String>,
}

impl PayoutValidationRequestDto {
    /// Amount as a float; input that is not a number reads as NaN.
    pub fn requested_amount(&self) -> f64 {
        match &self.amount {
            Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutResponseDto {
    pub success: bool,
    pub message: String,
    pub payout: PayoutRequest,
}

impl PayoutResponseDto {
    pub fn new(message: &str, payout: PayoutRequest) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            payout,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRejectionResponseDto {
    pub success: bool,
    pub status: String,
    pub reason: PayoutRejectionReason,
    pub message: String,
}

impl PayoutRejectionResponseDto {
    pub fn new(reason: PayoutRejectionReason, message: String) -> Self {
        Self {
            success: false,
            status: "fail".to_string(),
            reason,
            message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutTransitionRequestDto {
    pub payout: PayoutRequest,
    pub status: PayoutStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(amount: Value) -> PayoutValidationRequestDto {
        serde_json::from_value(json!({
            "amount": amount,
            "availableBalance": "5000",
            "paymentMethod": "bkash",
            "affiliateId": "aff-1"
        }))
        .unwrap()
    }

    #[test]
    fn test_requested_amount_reads_numbers_and_numeric_text() {
        assert_eq!(request(json!(1200.5)).requested_amount(), 1200.5);
        assert_eq!(request(json!(" 1200 ")).requested_amount(), 1200.0);
    }

    #[test]
    fn test_requested_amount_is_nan_for_unusable_input() {
        assert!(request(json!("abc")).requested_amount().is_nan());
        assert!(request(Value::Null).requested_amount().is_nan());
        assert!(request(json!(true)).requested_amount().is_nan());

        let missing: PayoutValidationRequestDto = serde_json::from_value(json!({
            "availableBalance": "5000",
            "paymentMethod": "bkash"
        }))
        .unwrap();
        assert!(missing.amount.is_none());
        assert!(missing.requested_amount().is_nan());
    }
}
