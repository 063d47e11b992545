//! Earnings aggregation shared by the dashboard, earnings, performance and
//! payout views.
//!
//! Every function here is a pure function of its arguments: no I/O, no
//! shared state, safe to call from any number of tasks at once.
use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Datelike, Utc};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        affiliatemodel::{AffiliateAccount, PaymentMethod},
        earningmodel::{EarningRecord, EarningStatus, EarningType},
    },
    service::error::PayoutRejectionReason,
    utils::decimal::{decimal_from_f64, BigDecimalHelpers},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeTotal {
    pub total: BigDecimal,
    pub count: u64,
}

/// Totals over a set of earning records.
///
/// `total` counts every record, including `failed` and `cancelled` ones.
/// Those reversed amounts are also reported on their own in `reversed` so a
/// caller can net them out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    pub total: BigDecimal,
    pub pending: BigDecimal,
    pub paid: BigDecimal,
    pub reversed: BigDecimal,
    pub by_type: BTreeMap<EarningType, TypeTotal>,
}

pub fn summarize(records: &[EarningRecord]) -> EarningsSummary {
    let mut summary = EarningsSummary::default();

    for record in records {
        summary.total += &record.amount;

        match record.status {
            EarningStatus::Pending => summary.pending += &record.amount,
            EarningStatus::Paid => summary.paid += &record.amount,
            EarningStatus::Failed | EarningStatus::Cancelled => summary.reversed += &record.amount,
        }

        let bucket = summary.by_type.entry(record.earning_type).or_default();
        bucket.total += &record.amount;
        bucket.count += 1;
    }

    summary
}

/// A calendar month, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: DateTime<Utc>) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            YearMonth { year: self.year - 1, month: 12 }
        } else {
            YearMonth { year: self.year, month: self.month - 1 }
        }
    }
}

/// Month-over-month growth, in percent, of the reference month against the
/// month before it.
///
/// With nothing earned last month the result is 100 when this month has
/// earnings and 0 otherwise.
pub fn monthly_growth(records: &[EarningRecord], reference_date: DateTime<Utc>) -> f64 {
    let current_month = YearMonth::of(reference_date);
    let previous_month = current_month.previous();

    let mut current = BigDecimal::zero();
    let mut previous = BigDecimal::zero();

    for record in records {
        let month = YearMonth::of(record.earned_at);
        if month == current_month {
            current += &record.amount;
        } else if month == previous_month {
            previous += &record.amount;
        }
    }

    growth_percentage(&current, &previous)
}

pub fn growth_percentage(current: &BigDecimal, previous: &BigDecimal) -> f64 {
    if previous.is_zero() {
        return if current > &BigDecimal::zero() { 100.0 } else { 0.0 };
    }

    let percentage = (current - previous) / previous * BigDecimal::from(100);
    percentage.to_f64_or_zero()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: BigDecimal,
    pub count: u64,
}

/// Longest series `monthly_totals` will build: one hundred years.
pub const MAX_SERIES_MONTHS: usize = 1200;

/// Per-month totals for the `months` calendar months ending with the
/// reference month, oldest first. Months without earnings are included
/// with a zero total. `months` is capped at `MAX_SERIES_MONTHS`.
pub fn monthly_totals(
    records: &[EarningRecord],
    reference_date: DateTime<Utc>,
    months: usize,
) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<YearMonth, TypeTotal> =
        std::iter::successors(Some(YearMonth::of(reference_date)), |month| Some(month.previous()))
            .take(months.min(MAX_SERIES_MONTHS))
            .map(|month| (month, TypeTotal::default()))
            .collect();

    for record in records {
        if let Some(bucket) = buckets.get_mut(&YearMonth::of(record.earned_at)) {
            bucket.total += &record.amount;
            bucket.count += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(month, bucket)| MonthlyTotal {
            year: month.year,
            month: month.month,
            total: bucket.total,
            count: bucket.count,
        })
        .collect()
}

/// Whether the pending balance has reached the payout threshold. Inclusive.
pub fn payout_eligibility(pending_earnings: &BigDecimal, minimum_payout: &BigDecimal) -> bool {
    pending_earnings >= minimum_payout
}

/// A payout request that passed every rule, with its inputs parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayout {
    pub amount: BigDecimal,
    pub method: PaymentMethod,
}

/// Checks a payout request against the rules below, in this order, and
/// reports the first one that fails:
///
/// 1. the amount is a positive, finite number
/// 2. the amount reaches `minimum_payout`
/// 3. the amount does not exceed `available_balance`
/// 4. a payment method was selected
/// 5. the selected method is among `configured_methods`
pub fn validate_payout_request(
    requested_amount: f64,
    available_balance: &BigDecimal,
    minimum_payout: &BigDecimal,
    selected_method: &str,
    configured_methods: &[PaymentMethod],
) -> Result<(), PayoutRejectionReason> {
    check_payout_request(
        requested_amount,
        available_balance,
        minimum_payout,
        selected_method,
        configured_methods,
    )
    .map(|_| ())
}

pub(crate) fn check_payout_request(
    requested_amount: f64,
    available_balance: &BigDecimal,
    minimum_payout: &BigDecimal,
    selected_method: &str,
    configured_methods: &[PaymentMethod],
) -> Result<ValidatedPayout, PayoutRejectionReason> {
    let amount = match decimal_from_f64(requested_amount) {
        Some(amount) if amount > BigDecimal::zero() => amount,
        _ => return Err(PayoutRejectionReason::InvalidAmount),
    };

    if &amount < minimum_payout {
        return Err(PayoutRejectionReason::BelowMinimum);
    }

    if &amount > available_balance {
        return Err(PayoutRejectionReason::InsufficientBalance);
    }

    let selected_method = selected_method.trim();
    if selected_method.is_empty() {
        return Err(PayoutRejectionReason::NoMethodSelected);
    }

    let method = selected_method
        .parse::<PaymentMethod>()
        .map_err(|_| PayoutRejectionReason::MethodNotConfigured)?;

    if !configured_methods.contains(&method) {
        return Err(PayoutRejectionReason::MethodNotConfigured);
    }

    Ok(ValidatedPayout { amount, method })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_earnings: BigDecimal,
    pub pending_earnings: BigDecimal,
    pub paid_earnings: BigDecimal,
    pub reversed_earnings: BigDecimal,
    pub available_balance: BigDecimal,
    pub minimum_payout: BigDecimal,
    pub can_request_payout: bool,
    pub monthly_growth: f64,
    pub payment_method: Option<PaymentMethod>,
    pub by_type: BTreeMap<EarningType, TypeTotal>,
    pub recent_transactions: Vec<EarningRecord>,
}

/// Everything the affiliate dashboard shows, computed in one place.
///
/// Pending earnings are what a payout can draw from, so they double as the
/// available balance.
pub fn dashboard_stats(
    account: &AffiliateAccount,
    records: &[EarningRecord],
    reference_date: DateTime<Utc>,
    recent_limit: usize,
) -> DashboardStats {
    let summary = summarize(records);
    let growth = monthly_growth(records, reference_date);
    let can_request_payout = payout_eligibility(&summary.pending, &account.minimum_payout);

    let mut recent = records.to_vec();
    recent.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
    recent.truncate(recent_limit);

    DashboardStats {
        available_balance: summary.pending.clone(),
        total_earnings: summary.total,
        pending_earnings: summary.pending,
        paid_earnings: summary.paid,
        reversed_earnings: summary.reversed,
        minimum_payout: account.minimum_payout.clone(),
        can_request_payout,
        monthly_growth: growth,
        payment_method: account.payment_method(),
        by_type: summary.by_type,
        recent_transactions: recent,
    }
}
