// models/earningmodel.rs
use std::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Type names outside the known set land in `Other` instead of failing the whole payload.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum EarningType {
    DepositCommission,
    BetCommission,
    WithdrawalCommission,
    RegistrationBonus,
    Cpa,
    Other,
}

impl EarningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EarningType::DepositCommission => "deposit_commission",
            EarningType::BetCommission => "bet_commission",
            EarningType::WithdrawalCommission => "withdrawal_commission",
            EarningType::RegistrationBonus => "registration_bonus",
            EarningType::Cpa => "cpa",
            EarningType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EarningType::DepositCommission => "Deposit Commission",
            EarningType::BetCommission => "Bet Commission",
            EarningType::WithdrawalCommission => "Withdrawal Commission",
            EarningType::RegistrationBonus => "Registration Bonus",
            EarningType::Cpa => "CPA",
            EarningType::Other => "Other",
        }
    }
}

impl FromStr for EarningType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit_commission" => Ok(EarningType::DepositCommission),
            "bet_commission" => Ok(EarningType::BetCommission),
            "withdrawal_commission" => Ok(EarningType::WithdrawalCommission),
            "registration_bonus" => Ok(EarningType::RegistrationBonus),
            "cpa" => Ok(EarningType::Cpa),
            "other" => Ok(EarningType::Other),
            other => Err(format!("Unknown earning type: {}", other)),
        }
    }
}

impl From<String> for EarningType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(EarningType::Other)
    }
}

impl fmt::Display for EarningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EarningStatus {
    Pending,
    Paid,
    Failed,
    Cancelled,
}

impl EarningStatus {
    /// Earnings only ever leave `pending`; every other status is final.
    pub fn can_transition_to(&self, to: EarningStatus) -> bool {
        matches!(
            (self, to),
            (EarningStatus::Pending, EarningStatus::Paid)
                | (EarningStatus::Pending, EarningStatus::Failed)
                | (EarningStatus::Pending, EarningStatus::Cancelled)
        )
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self, EarningStatus::Failed | EarningStatus::Cancelled)
    }
}

impl fmt::Display for EarningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EarningStatus::Pending => "pending",
            EarningStatus::Paid => "paid",
            EarningStatus::Failed => "failed",
            EarningStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One commission or bonus event credited to an affiliate.
///
/// The ledger is append-only: a record is never edited in place, and the
/// only change it accepts is leaving `pending` through [`EarningRecord::settle`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EarningRecord {
    pub id: String,
    pub affiliate_id: String,
    #[serde(rename = "type")]
    pub earning_type: EarningType,
    pub amount: BigDecimal,
    pub status: EarningStatus,
    #[serde(default)]
    pub source_amount: Option<BigDecimal>,
    #[serde(default)]
    pub commission_rate: Option<BigDecimal>, // fraction, 0.05 == 5%
    pub earned_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl EarningRecord {
    /// `source_amount * commission_rate`, when the record carries both.
    ///
    /// Only for auditing; `amount` stays whatever the commission backend wrote.
    pub fn expected_amount(&self) -> Option<BigDecimal> {
        match (&self.source_amount, &self.commission_rate) {
            (Some(source), Some(rate)) => Some(source * rate),
            _ => None,
        }
    }

    /// Returns the record moved to `status`, or `None` if it already left `pending`.
    pub fn settle(self, status: EarningStatus) -> Option<EarningRecord> {
        if !self.status.can_transition_to(status) {
            return None;
        }
        Some(EarningRecord { status, ..self })
    }
}
