pub mod earnings_aggregator;
pub mod earnings_query;
pub mod error;
pub mod payout_service;
