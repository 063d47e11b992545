// models/payoutmodel.rs
use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::affiliatemodel::PaymentMethod;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    OnHold,
}

impl PayoutStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PayoutStatus::Completed | PayoutStatus::Failed | PayoutStatus::Cancelled
        )
    }

    pub fn can_transition_to(&self, to: PayoutStatus) -> bool {
        match (self, to) {
            (PayoutStatus::Pending, PayoutStatus::Processing) => true,
            (PayoutStatus::Pending, PayoutStatus::OnHold) => true,
            (PayoutStatus::Pending, PayoutStatus::Cancelled) => true,
            (PayoutStatus::OnHold, PayoutStatus::Pending) => true,
            (PayoutStatus::OnHold, PayoutStatus::Processing) => true,
            (PayoutStatus::OnHold, PayoutStatus::Cancelled) => true,
            (PayoutStatus::Processing, PayoutStatus::Completed) => true,
            (PayoutStatus::Processing, PayoutStatus::Failed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Processing => "processing",
            PayoutStatus::Completed => "completed",
            PayoutStatus::Failed => "failed",
            PayoutStatus::Cancelled => "cancelled",
            PayoutStatus::OnHold => "on_hold",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    pub id: String,
    pub affiliate_id: String,
    pub amount: BigDecimal,
    pub status: PayoutStatus,
    pub payment_method: PaymentMethod,
    pub requested_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub transaction_id: Option<String>, // provider reference, set once the money moves
}

pub fn generate_payout_reference() -> String {
    format!("PAY_{}", uuid::Uuid::new_v4().simple().to_string().to_uppercase()[..16].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses_never_transition() {
        let all = [
            PayoutStatus::Pending,
            PayoutStatus::Processing,
            PayoutStatus::Completed,
            PayoutStatus::Failed,
            PayoutStatus::Cancelled,
            PayoutStatus::OnHold,
        ];
        for from in all.iter().filter(|s| s.is_terminal()) {
            for to in all {
                assert!(!from.can_transition_to(to), "{} -> {} must be rejected", from, to);
            }
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        assert!(PayoutStatus::Pending.can_transition_to(PayoutStatus::Processing));
        assert!(PayoutStatus::Processing.can_transition_to(PayoutStatus::Completed));
        assert!(PayoutStatus::OnHold.can_transition_to(PayoutStatus::Pending));
        assert!(!PayoutStatus::Pending.can_transition_to(PayoutStatus::Completed));
    }

    #[test]
    fn test_payout_reference_format() {
        let reference = generate_payout_reference();
        assert!(reference.starts_with("PAY_"));
        assert_eq!(reference.len(), 20);
        assert_ne!(reference, generate_payout_reference());
    }
}
