// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{earnings::earnings_handler, payouts::payouts_handler},
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/earnings", earnings_handler())
        .nest("/payouts", payouts_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    };
    use bigdecimal::BigDecimal;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(AppState { env: Config::default() }))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn records() -> Value {
        json!([
            {
                "id": "r1",
                "affiliateId": "aff-1",
                "type": "deposit_commission",
                "amount": "300",
                "status": "paid",
                "earnedAt": "2026-03-02T10:00:00Z"
            },
            {
                "id": "r2",
                "affiliateId": "aff-1",
                "type": "registration_bonus",
                "amount": "200",
                "status": "pending",
                "earnedAt": "2026-03-05T10:00:00Z"
            }
        ])
    }

    fn decimal(value: &Value) -> BigDecimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_response_shape() {
        let (status, json) = post_json(
            "/api/earnings/stats",
            json!({
                "account": { "affiliateId": "aff-1", "minimumPayout": "150" },
                "records": records(),
                "referenceDate": "2026-03-20T00:00:00Z",
                "recentLimit": 1
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let stats = &json["stats"];
        assert_eq!(decimal(&stats["totalEarnings"]), BigDecimal::from(500));
        assert_eq!(decimal(&stats["pendingEarnings"]), BigDecimal::from(200));
        assert_eq!(decimal(&stats["paidEarnings"]), BigDecimal::from(300));
        assert_eq!(stats["canRequestPayout"], true);
        assert_eq!(stats["monthlyGrowth"], 100.0);
        assert_eq!(stats["recentTransactions"].as_array().unwrap().len(), 1);
        assert_eq!(stats["recentTransactions"][0]["id"], "r2");
        assert_eq!(stats["byType"]["deposit_commission"]["count"], 1);
    }

    #[tokio::test]
    async fn test_stats_rejects_bad_limit() {
        let (status, json) = post_json(
            "/api/earnings/stats",
            json!({ "account": { "affiliateId": "aff-1" }, "records": [], "recentLimit": 0 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "fail");
    }

    #[tokio::test]
    async fn test_summary_endpoint() {
        let (status, json) = post_json("/api/earnings/summary", json!({ "records": records() })).await;

        assert_eq!(status, StatusCode::OK);
        let summary = &json["summary"];
        assert_eq!(decimal(&summary["total"]), BigDecimal::from(500));
        assert_eq!(summary["byType"]["registration_bonus"]["label"], "Registration Bonus");
        assert_eq!(summary["byType"].as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_growth_endpoint() {
        let (status, json) = post_json(
            "/api/earnings/growth",
            json!({ "records": records(), "referenceDate": "2026-04-02T00:00:00Z", "months": 3 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["monthlyGrowth"], -100.0);
        let series = json["series"].as_array().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[1]["month"], 3);
        assert_eq!(series[1]["count"], 2);
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let (status, json) = post_json(
            "/api/earnings/search",
            json!({ "records": records(), "query": { "status": "pending", "limit": 5 } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["pagination"]["total"], 1);
        assert_eq!(json["pagination"]["totalPages"], 1);
    }

    #[tokio::test]
    async fn test_eligibility_uses_configured_minimum() {
        let (status, json) = post_json("/api/payouts/eligibility", json!({ "pendingEarnings": "999" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["eligible"], false);
        assert_eq!(decimal(&json["shortfall"]), BigDecimal::from(1));
    }

    #[tokio::test]
    async fn test_payout_accepted() {
        let (status, json) = post_json(
            "/api/payouts/validate",
            json!({
                "amount": 1200.0,
                "availableBalance": "1250.75",
                "paymentMethod": "bkash",
                "account": {
                    "affiliateId": "aff-1",
                    "payment": { "method": "bkash", "phoneNumber": "01712345678" }
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["payout"]["status"], "pending");
        assert_eq!(json["payout"]["paymentMethod"], "bkash");
        assert_eq!(json["payout"]["affiliateId"], "aff-1");
    }

    #[tokio::test]
    async fn test_payout_rejected_with_first_reason() {
        let (status, json) = post_json(
            "/api/payouts/validate",
            json!({
                "amount": 1500.0,
                "availableBalance": "1250.75",
                "minimumPayout": "1000",
                "paymentMethod": "",
                "affiliateId": "aff-1"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
        assert_eq!(json["reason"], "insufficient_balance");
        assert_eq!(json["message"], "Insufficient balance. Available: ৳1,250.75");
    }

    #[tokio::test]
    async fn test_payout_with_unusable_amount() {
        for amount in [json!("abc"), Value::Null, json!(""), json!(-50)] {
            let (status, json) = post_json(
                "/api/payouts/validate",
                json!({
                    "amount": amount,
                    "availableBalance": "1250.75",
                    "paymentMethod": "bkash",
                    "affiliateId": "aff-1"
                }),
            )
            .await;

            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(json["success"], false);
            assert_eq!(json["reason"], "invalid_amount");
            assert_eq!(json["message"], "Please enter a valid amount");
        }

        let (status, json) = post_json(
            "/api/payouts/validate",
            json!({ "availableBalance": "1250.75", "paymentMethod": "bkash", "affiliateId": "aff-1" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["reason"], "invalid_amount");
    }

    #[tokio::test]
    async fn test_payout_amount_as_text() {
        let (status, json) = post_json(
            "/api/payouts/validate",
            json!({
                "amount": "1200",
                "availableBalance": "1250.75",
                "paymentMethod": "bkash",
                "affiliateId": "aff-1",
                "configuredMethods": ["bkash"]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&json["payout"]["amount"]), BigDecimal::from(1200));
    }

    #[tokio::test]
    async fn test_payout_with_incomplete_details() {
        let (status, json) = post_json(
            "/api/payouts/validate",
            json!({
                "amount": 1000.0,
                "availableBalance": "5000",
                "paymentMethod": "nagad",
                "account": {
                    "affiliateId": "aff-1",
                    "payment": { "method": "nagad", "phoneNumber": "123" }
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["reason"], "method_not_configured");
    }

    #[tokio::test]
    async fn test_payout_without_affiliate() {
        let (status, _) = post_json(
            "/api/payouts/validate",
            json!({ "amount": 1000.0, "availableBalance": "5000", "paymentMethod": "bkash" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_transition_out_of_terminal_status() {
        let (status, json) = post_json(
            "/api/payouts/transition",
            json!({
                "payout": {
                    "id": "PAY_1",
                    "affiliateId": "aff-1",
                    "amount": "1200",
                    "status": "completed",
                    "paymentMethod": "bkash",
                    "requestedAt": "2026-05-01T08:30:00Z",
                    "completedAt": "2026-05-02T08:30:00Z",
                    "transactionId": "BKX1"
                },
                "status": "pending"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "fail");
    }

    #[tokio::test]
    async fn test_transition_to_processing() {
        let (status, json) = post_json(
            "/api/payouts/transition",
            json!({
                "payout": {
                    "id": "PAY_2",
                    "affiliateId": "aff-1",
                    "amount": "1200",
                    "status": "pending",
                    "paymentMethod": "nagad",
                    "requestedAt": "2026-05-01T08:30:00Z"
                },
                "status": "processing"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["payout"]["status"], "processing");
    }
}
