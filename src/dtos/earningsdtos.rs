// dtos/earningsdtos.rs
use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    models::{
        affiliatemodel::AffiliateAccount,
        earningmodel::{EarningRecord, EarningType},
    },
    service::{
        earnings_aggregator::{DashboardStats, EarningsSummary, MonthlyTotal, TypeTotal},
        earnings_query::{EarningsQuery, Page, PaginationMetadata},
    },
};

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EarningsStatsRequestDto {
    pub account: AffiliateAccount,
    #[serde(default)]
    pub records: Vec<EarningRecord>,
    #[serde(default)]
    pub reference_date: Option<DateTime<Utc>>,

    #[validate(range(min = 1, max = 100, message = "recentLimit must be between 1 and 100"))]
    #[serde(default)]
    pub recent_limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequestDto {
    #[serde(default)]
    pub records: Vec<EarningRecord>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRequestDto {
    #[serde(default)]
    pub records: Vec<EarningRecord>,
    #[serde(default)]
    pub reference_date: Option<DateTime<Utc>>,

    #[validate(range(min = 1, max = 24, message = "months must be between 1 and 24"))]
    #[serde(default)]
    pub months: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestDto {
    #[serde(default)]
    pub records: Vec<EarningRecord>,
    #[validate]
    #[serde(default)]
    pub query: EarningsQuery,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsStatsResponseDto {
    pub success: bool,
    pub stats: DashboardStats,
}

impl EarningsStatsResponseDto {
    pub fn new(stats: DashboardStats) -> Self {
        Self { success: true, stats }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponseDto {
    pub success: bool,
    pub summary: SummaryDto,
}

/// Summary with a display label next to each type bucket.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub total: BigDecimal,
    pub pending: BigDecimal,
    pub paid: BigDecimal,
    pub reversed: BigDecimal,
    pub by_type: BTreeMap<EarningType, TypeBreakdownDto>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdownDto {
    pub label: String,
    pub total: BigDecimal,
    pub count: u64,
}

impl From<EarningsSummary> for SummaryDto {
    fn from(summary: EarningsSummary) -> Self {
        Self {
            total: summary.total,
            pending: summary.pending,
            paid: summary.paid,
            reversed: summary.reversed,
            by_type: summary
                .by_type
                .into_iter()
                .map(|(earning_type, TypeTotal { total, count })| {
                    let breakdown = TypeBreakdownDto {
                        label: earning_type.label().to_string(),
                        total,
                        count,
                    };
                    (earning_type, breakdown)
                })
                .collect(),
        }
    }
}

impl SummaryResponseDto {
    pub fn new(summary: EarningsSummary) -> Self {
        Self {
            success: true,
            summary: summary.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthResponseDto {
    pub success: bool,
    pub monthly_growth: f64,
    pub series: Vec<MonthlyTotal>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponseDto {
    pub success: bool,
    pub data: Vec<EarningRecord>,
    pub pagination: PaginationMetadata,
}

impl From<Page<EarningRecord>> for SearchResponseDto {
    fn from(page: Page<EarningRecord>) -> Self {
        Self {
            success: true,
            data: page.data,
            pagination: page.pagination,
        }
    }
}
