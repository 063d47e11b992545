// service/payout_service.rs
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::{
    models::{
        affiliatemodel::PaymentMethod,
        payoutmodel::{generate_payout_reference, PayoutRequest, PayoutStatus},
    },
    service::{
        earnings_aggregator::check_payout_request,
        error::ServiceError,
    },
};

/// Validates the request and, when every rule passes, opens a `pending` payout.
pub fn create_payout_request(
    affiliate_id: &str,
    requested_amount: f64,
    available_balance: &BigDecimal,
    minimum_payout: &BigDecimal,
    selected_method: &str,
    configured_methods: &[PaymentMethod],
    requested_at: DateTime<Utc>,
) -> Result<PayoutRequest, ServiceError> {
    let validated = check_payout_request(
        requested_amount,
        available_balance,
        minimum_payout,
        selected_method,
        configured_methods,
    )?;

    Ok(PayoutRequest {
        id: generate_payout_reference(),
        affiliate_id: affiliate_id.to_string(),
        amount: validated.amount,
        status: PayoutStatus::Pending,
        payment_method: validated.method,
        requested_at,
        completed_at: None,
        transaction_id: None,
    })
}

/// Moves a payout to `to`. Completing a payout needs the provider's
/// transaction id, either already on the payout or passed in.
pub fn transition_payout(
    payout: PayoutRequest,
    to: PayoutStatus,
    transaction_id: Option<String>,
    at: DateTime<Utc>,
) -> Result<PayoutRequest, ServiceError> {
    if !payout.status.can_transition_to(to) {
        return Err(ServiceError::InvalidPayoutTransition(format!(
            "Cannot transition payout {} from {} to {}",
            payout.id, payout.status, to
        )));
    }

    let transaction_id = transaction_id
        .filter(|id| !id.trim().is_empty())
        .or(payout.transaction_id);

    if to == PayoutStatus::Completed && transaction_id.is_none() {
        return Err(ServiceError::Validation(
            "transactionId is required to complete a payout".to_string(),
        ));
    }

    let completed_at = if to == PayoutStatus::Completed {
        Some(at)
    } else {
        payout.completed_at
    };

    Ok(PayoutRequest {
        status: to,
        transaction_id,
        completed_at,
        ..payout
    })
}
