use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::earningmodel::{EarningRecord, EarningStatus, EarningType};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    EarnedAt,
    Amount,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// Filter, sort and paging options for an earnings list the caller already holds.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EarningsQuery {
    #[serde(default, rename = "type")]
    pub earning_type: Option<EarningType>,
    #[serde(default)]
    pub status: Option<EarningStatus>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,

    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: u32,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: u32,
}

impl Default for EarningsQuery {
    fn default() -> Self {
        Self {
            earning_type: None,
            status: None,
            start_date: None,
            end_date: None,
            search: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: default_page(),
            limit: default_limit(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMetadata,
}

impl EarningsQuery {
    pub fn matches(&self, record: &EarningRecord) -> bool {
        if self.earning_type.is_some_and(|t| t != record.earning_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != record.status) {
            return false;
        }
        if self.start_date.is_some_and(|start| record.earned_at < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| record.earned_at > end) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                record.earning_type.as_str().contains(&term)
                    || record.earning_type.label().to_lowercase().contains(&term)
                    || record
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }

    /// Filters, sorts (stable, so ties keep their input order) and slices out one page.
    pub fn apply(&self, records: &[EarningRecord]) -> Page<EarningRecord> {
        let mut selected: Vec<EarningRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        selected.sort_by(|a, b| {
            let ordering = match self.sort_by {
                SortField::EarnedAt => a.earned_at.cmp(&b.earned_at),
                SortField::Amount => a.amount.cmp(&b.amount),
            };
            match self.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let page = self.page.max(1);
        let limit = self.limit.max(1);
        let total = selected.len() as u64;
        let total_pages = total.div_ceil(limit as u64);

        let offset = (page as usize - 1).saturating_mul(limit as usize);
        let data = selected
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect();

        Page {
            data,
            pagination: PaginationMetadata {
                total,
                page,
                limit,
                total_pages,
            },
        }
    }
}
