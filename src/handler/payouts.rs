use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use bigdecimal::BigDecimal;
use chrono::Utc;
use num_traits::Zero;
use validator::Validate;

use crate::{
    dtos::payoutdtos::{
        EligibilityRequestDto, EligibilityResponseDto, PayoutRejectionResponseDto,
        PayoutResponseDto, PayoutTransitionRequestDto, PayoutValidationRequestDto,
    },
    error::HttpError,
    service::{
        earnings_aggregator::payout_eligibility,
        error::ServiceError,
        payout_service::{create_payout_request, transition_payout},
    },
    AppState,
};

pub fn payouts_handler() -> Router {
    Router::new()
        .route("/eligibility", post(check_eligibility))
        .route("/validate", post(request_payout))
        .route("/transition", post(update_payout_status))
}

pub async fn check_eligibility(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<EligibilityRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    let minimum_payout = body
        .minimum_payout
        .unwrap_or_else(|| app_state.env.minimum_payout.clone());

    let eligible = payout_eligibility(&body.pending_earnings, &minimum_payout);
    let shortfall = if eligible {
        BigDecimal::zero()
    } else {
        &minimum_payout - &body.pending_earnings
    };

    Ok(Json(EligibilityResponseDto {
        success: true,
        eligible,
        minimum_payout,
        shortfall,
    }))
}

pub async fn request_payout(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<PayoutValidationRequestDto>,
) -> Result<Response, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let affiliate_id = body
        .account
        .as_ref()
        .map(|account| account.affiliate_id.clone())
        .or_else(|| body.affiliate_id.clone())
        .ok_or_else(|| HttpError::bad_request("affiliateId or account is required"))?;

    let minimum_payout = body
        .minimum_payout
        .clone()
        .or_else(|| body.account.as_ref().map(|account| account.minimum_payout.clone()))
        .unwrap_or_else(|| app_state.env.minimum_payout.clone());

    let configured_methods = match &body.account {
        Some(account) => account.configured_methods(),
        None => body.configured_methods.clone(),
    };

    let requested_amount = body.requested_amount();

    match create_payout_request(
        &affiliate_id,
        requested_amount,
        &body.available_balance,
        &minimum_payout,
        &body.payment_method,
        &configured_methods,
        Utc::now(),
    ) {
        Ok(payout) => {
            tracing::info!(
                "Payout {} of {} via {} accepted for affiliate {}",
                payout.id,
                payout.amount,
                payout.payment_method,
                affiliate_id
            );
            Ok(Json(PayoutResponseDto::new("Payout request submitted successfully", payout)).into_response())
        }
        Err(ServiceError::PayoutRejected(reason)) => {
            tracing::warn!(
                "Payout of {} rejected for affiliate {}: {}",
                requested_amount,
                affiliate_id,
                reason
            );
            let status = ServiceError::PayoutRejected(reason).status_code();
            let message = reason.user_message(&minimum_payout, &body.available_balance);
            Ok((status, Json(PayoutRejectionResponseDto::new(reason, message))).into_response())
        }
        Err(error) => Err(error.into()),
    }
}

pub async fn update_payout_status(
    Json(body): Json<PayoutTransitionRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    let from = body.payout.status;
    let payout = transition_payout(body.payout, body.status, body.transaction_id, Utc::now())?;

    tracing::info!("Payout {} moved from {} to {}", payout.id, from, payout.status);

    Ok(Json(PayoutResponseDto::new("Payout status updated", payout)))
}
