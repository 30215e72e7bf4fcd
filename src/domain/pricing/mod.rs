mod competitor;
mod engine;
mod monitor;

pub use competitor::{PriceBand, competitor_display_prices};
pub use engine::{Margin, compute_list_price, compute_margin, round2};
pub use monitor::{MarginEvaluation, MarginMonitor, MarginPolicy};

use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Markup and competitor-band settings applied at import time
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Percentage added to cost to derive the list price
    pub markup_percent: Decimal,
    /// Per-competitor display multiplier bands, e.g. amazon -> [1.82, 1.88]
    pub competitor_bands: BTreeMap<String, PriceBand>,
}

impl PricingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.markup_percent < Decimal::ZERO {
            return Err(format!("Invalid markup_percent: {}", self.markup_percent));
        }
        Ok(())
    }
}
