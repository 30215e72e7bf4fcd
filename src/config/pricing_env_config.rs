//! Pricing configuration parsing from environment variables.
//!
//! Covers markup, competitor display bands and the margin-degradation
//! policy.

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

use crate::domain::pricing::PriceBand;

const DEFAULT_COMPETITOR_BANDS: &str = "amazon:1.82:1.88,costco:1.80:1.85,ebay:1.87:1.93";

/// Pricing environment configuration
#[derive(Debug, Clone)]
pub struct PricingEnvConfig {
    pub markup_percent: Decimal,
    pub competitor_bands: BTreeMap<String, PriceBand>,
    pub min_margin_percent: Decimal,
    pub grace_period_hours: i64,
    /// Fixed seed for competitor price draws; omit for OS entropy
    pub competitor_price_seed: Option<u64>,
}

impl PricingEnvConfig {
    pub fn from_env() -> Result<Self> {
        let bands_raw = env::var("COMPETITOR_BANDS")
            .unwrap_or_else(|_| DEFAULT_COMPETITOR_BANDS.to_string());

        Ok(Self {
            markup_percent: Self::parse_decimal("MARKUP_PERCENT", "70")?,
            competitor_bands: Self::parse_bands(&bands_raw)?,
            min_margin_percent: Self::parse_decimal("MIN_MARGIN_PERCENT", "30")?,
            grace_period_hours: Self::parse_i64("GRACE_PERIOD_HOURS", 24)?,
            competitor_price_seed: env::var("COMPETITOR_PRICE_SEED")
                .ok()
                .and_then(|s| s.parse::<u64>().ok()),
        })
    }

    /// Parse `name:min:max,name:min:max` into competitor bands
    fn parse_bands(raw: &str) -> Result<BTreeMap<String, PriceBand>> {
        let mut bands = BTreeMap::new();
        for entry in raw.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let mut parts = entry.split(':');
            let (Some(name), Some(min), Some(max), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                bail!("Malformed COMPETITOR_BANDS entry: {entry}");
            };
            let min = min
                .parse::<f64>()
                .context(format!("Bad band minimum in {entry}"))?;
            let max = max
                .parse::<f64>()
                .context(format!("Bad band maximum in {entry}"))?;
            let band = PriceBand::new(min, max)
                .map_err(|e| anyhow::anyhow!("Invalid band for {name}: {e}"))?;
            bands.insert(name.trim().to_string(), band);
        }
        Ok(bands)
    }

    fn parse_decimal(key: &str, default: &str) -> Result<Decimal> {
        let raw = env::var(key).unwrap_or_else(|_| default.to_string());
        Decimal::from_str(&raw).context(format!("Failed to parse {}", key))
    }

    fn parse_i64(key: &str, default: i64) -> Result<i64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<i64>()
            .context(format!("Failed to parse {}", key))
    }
}
