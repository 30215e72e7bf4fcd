//! Discovery configuration parsing from environment variables.
//!
//! Covers the criteria filter thresholds, exclusion lists and the demand
//! gate.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Discovery environment configuration
#[derive(Debug, Clone)]
pub struct DiscoveryEnvConfig {
    // Scan
    pub scan_query: String,
    pub scan_limit: usize,
    pub rank_history_days: u32,

    // Criteria filter
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_reviews: u32,
    pub min_rating: f64,
    pub require_prime: bool,
    pub excluded_brands: Vec<String>,
    pub excluded_conditions: Vec<String>,

    // Demand gate
    pub max_acceptable_rank: u64,
    pub max_volatility_fraction: f64,
    pub prime_score_multiplier: f64,
}

impl DiscoveryEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            scan_query: env::var("SCAN_QUERY").unwrap_or_else(|_| "kitchen gadgets".to_string()),
            scan_limit: Self::parse_usize("SCAN_LIMIT", 50)?,
            rank_history_days: Self::parse_u32("RANK_HISTORY_DAYS", 90)?,
            min_price: Self::parse_decimal("MIN_PRICE", "3")?,
            max_price: Self::parse_decimal("MAX_PRICE", "25")?,
            min_reviews: Self::parse_u32("MIN_REVIEWS", 500)?,
            min_rating: Self::parse_f64("MIN_RATING", 3.5)?,
            require_prime: Self::parse_bool("REQUIRE_PRIME", true),
            excluded_brands: Self::parse_list("EXCLUDED_BRANDS", ""),
            excluded_conditions: Self::parse_list(
                "EXCLUDED_CONDITIONS",
                "refurbished,renewed,used,open box",
            ),
            max_acceptable_rank: Self::parse_u64("MAX_ACCEPTABLE_RANK", 100_000)?,
            max_volatility_fraction: Self::parse_f64("MAX_VOLATILITY_FRACTION", 0.5)?,
            prime_score_multiplier: Self::parse_f64("PRIME_SCORE_MULTIPLIER", 1.0)?,
        })
    }

    fn parse_list(key: &str, default: &str) -> Vec<String> {
        let raw = env::var(key).unwrap_or_else(|_| default.to_string());
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn parse_decimal(key: &str, default: &str) -> Result<Decimal> {
        let raw = env::var(key).unwrap_or_else(|_| default.to_string());
        Decimal::from_str(&raw).context(format!("Failed to parse {}", key))
    }

    fn parse_usize(key: &str, default: usize) -> Result<usize> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<usize>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_u32(key: &str, default: u32) -> Result<u32> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u32>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_u64(key: &str, default: u64) -> Result<u64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u64>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_f64(key: &str, default: f64) -> Result<f64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<f64>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_bool(key: &str, default: bool) -> bool {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<bool>()
            .unwrap_or(default)
    }
}
