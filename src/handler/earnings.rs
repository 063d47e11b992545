use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use chrono::Utc;
use validator::Validate;

use crate::{
    dtos::earningsdtos::{
        EarningsStatsRequestDto, EarningsStatsResponseDto, GrowthRequestDto, GrowthResponseDto,
        SearchRequestDto, SearchResponseDto, SummaryRequestDto, SummaryResponseDto,
    },
    error::HttpError,
    service::earnings_aggregator::{dashboard_stats, monthly_growth, monthly_totals, summarize},
    AppState,
};

const DEFAULT_GROWTH_MONTHS: u32 = 6;

pub fn earnings_handler() -> Router {
    Router::new()
        .route("/stats", post(get_dashboard_stats))
        .route("/summary", post(summarize_earnings))
        .route("/growth", post(get_monthly_growth))
        .route("/search", post(search_earnings))
}

pub async fn get_dashboard_stats(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<EarningsStatsRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let reference_date = body.reference_date.unwrap_or_else(Utc::now);
    let recent_limit = body
        .recent_limit
        .map(|limit| limit as usize)
        .unwrap_or(app_state.env.recent_transactions_limit);

    let stats = dashboard_stats(&body.account, &body.records, reference_date, recent_limit);

    tracing::debug!(
        "Dashboard stats for affiliate {}: {} records, pending {}, eligible {}",
        body.account.affiliate_id,
        body.records.len(),
        stats.pending_earnings,
        stats.can_request_payout
    );

    Ok(Json(EarningsStatsResponseDto::new(stats)))
}

pub async fn summarize_earnings(
    Json(body): Json<SummaryRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    let summary = summarize(&body.records);

    tracing::debug!("Summarized {} earning records", body.records.len());

    Ok(Json(SummaryResponseDto::new(summary)))
}

pub async fn get_monthly_growth(
    Json(body): Json<GrowthRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let reference_date = body.reference_date.unwrap_or_else(Utc::now);
    let months = body.months.unwrap_or(DEFAULT_GROWTH_MONTHS) as usize;

    Ok(Json(GrowthResponseDto {
        success: true,
        monthly_growth: monthly_growth(&body.records, reference_date),
        series: monthly_totals(&body.records, reference_date, months),
    }))
}

pub async fn search_earnings(
    Json(body): Json<SearchRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = body.query.apply(&body.records);

    Ok(Json(SearchResponseDto::from(page)))
}
