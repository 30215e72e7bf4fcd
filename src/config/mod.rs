//! Configuration module for Dropline.
//!
//! This module provides structured configuration loading from environment
//! variables, organized by domain: Discovery and Pricing. Conversion methods
//! produce validated domain value objects for the services.

mod discovery_env_config;
mod pricing_env_config;

pub use discovery_env_config::DiscoveryEnvConfig;
pub use pricing_env_config::PricingEnvConfig;

use anyhow::Result;
use chrono::Duration;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::domain::demand::DemandConfig;
use crate::domain::discovery::DiscoveryCriteria;
use crate::domain::pricing::{MarginPolicy, PriceBand, PricingConfig};

/// Main application configuration.
///
/// Aggregates the sub-configs and provides flat field access plus
/// conversions into the domain value objects.
#[derive(Debug, Clone)]
pub struct Config {
    // Scan
    pub scan_query: String,
    pub scan_limit: usize,
    pub rank_history_days: u32,

    // Criteria filter (from DiscoveryEnvConfig)
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_reviews: u32,
    pub min_rating: f64,
    pub require_prime: bool,
    pub excluded_brands: Vec<String>,
    pub excluded_conditions: Vec<String>,

    // Demand gate (from DiscoveryEnvConfig)
    pub max_acceptable_rank: u64,
    pub max_volatility_fraction: f64,
    pub prime_score_multiplier: f64,

    // Pricing (from PricingEnvConfig)
    pub markup_percent: Decimal,
    pub competitor_bands: BTreeMap<String, PriceBand>,
    pub min_margin_percent: Decimal,
    pub grace_period_hours: i64,
    pub competitor_price_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let discovery = DiscoveryEnvConfig::from_env()?;
        let pricing = PricingEnvConfig::from_env()?;

        Ok(Self {
            scan_query: discovery.scan_query,
            scan_limit: discovery.scan_limit,
            rank_history_days: discovery.rank_history_days,
            min_price: discovery.min_price,
            max_price: discovery.max_price,
            min_reviews: discovery.min_reviews,
            min_rating: discovery.min_rating,
            require_prime: discovery.require_prime,
            excluded_brands: discovery.excluded_brands,
            excluded_conditions: discovery.excluded_conditions,
            max_acceptable_rank: discovery.max_acceptable_rank,
            max_volatility_fraction: discovery.max_volatility_fraction,
            prime_score_multiplier: discovery.prime_score_multiplier,
            markup_percent: pricing.markup_percent,
            competitor_bands: pricing.competitor_bands,
            min_margin_percent: pricing.min_margin_percent,
            grace_period_hours: pricing.grace_period_hours,
            competitor_price_seed: pricing.competitor_price_seed,
        })
    }

    /// Create validated criteria-filter settings from this Config
    pub fn to_discovery_criteria(&self) -> Result<DiscoveryCriteria> {
        let criteria = DiscoveryCriteria {
            min_price: self.min_price,
            max_price: self.max_price,
            min_reviews: self.min_reviews,
            min_rating: self.min_rating,
            require_prime: self.require_prime,
            excluded_brands: self.excluded_brands.clone(),
            excluded_conditions: self.excluded_conditions.clone(),
        };
        criteria
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid discovery criteria: {}", e))?;
        Ok(criteria)
    }

    /// Create validated demand-gate settings from this Config
    pub fn to_demand_config(&self) -> Result<DemandConfig> {
        let config = DemandConfig {
            max_acceptable_rank: self.max_acceptable_rank,
            max_volatility_fraction: self.max_volatility_fraction,
            prime_multiplier: self.prime_score_multiplier,
        };
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid demand config: {}", e))?;
        Ok(config)
    }

    /// Create validated pricing settings from this Config
    pub fn to_pricing_config(&self) -> Result<PricingConfig> {
        let config = PricingConfig {
            markup_percent: self.markup_percent,
            competitor_bands: self.competitor_bands.clone(),
        };
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid pricing config: {}", e))?;
        Ok(config)
    }

    /// Create a validated margin policy from this Config
    pub fn to_margin_policy(&self) -> Result<MarginPolicy> {
        let policy = MarginPolicy {
            min_margin_percent: self.min_margin_percent,
            grace_period: Duration::hours(self.grace_period_hours),
        };
        policy
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid margin policy: {}", e))?;
        Ok(policy)
    }
}
