// config.rs
use std::str::FromStr;

use bigdecimal::BigDecimal;
use tracing_subscriber::filter::LevelFilter;

use crate::models::affiliatemodel::DEFAULT_MINIMUM_PAYOUT;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub minimum_payout: BigDecimal,
    pub recent_transactions_limit: usize,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn init() -> Config {
        let port = env_or("PORT", 8000);
        let minimum_payout = env_or("MINIMUM_PAYOUT", BigDecimal::from(DEFAULT_MINIMUM_PAYOUT));
        let recent_transactions_limit = env_or("RECENT_TRANSACTIONS_LIMIT", 10);

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(|_| vec!["http://localhost:5173".to_string()]);

        Config {
            port,
            minimum_payout,
            recent_transactions_limit,
            allowed_origins,
        }
    }

    /// Read before the subscriber exists, so a bad value can only fall back silently.
    pub fn log_level() -> LevelFilter {
        std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| level.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::DEBUG)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            minimum_payout: BigDecimal::from(DEFAULT_MINIMUM_PAYOUT),
            recent_transactions_limit: 10,
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("⚠️  {} has an invalid value {:?}, using the default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}
