use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::errors::DomainError;
use crate::domain::pricing::engine::round2;

/// Multiplier band applied to the real list price for one competitor column,
/// e.g. [1.82, 1.88] displays the competitor 82-88% above our price so the
/// real price reads as a discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    min: f64,
    max: f64,
}

impl PriceBand {
    pub fn new(min: f64, max: f64) -> Result<Self, DomainError> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || max < min {
            return Err(DomainError::InvalidPriceBand { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Draw a display price for each competitor, uniformly within its band.
///
/// The randomness source is injected so callers (and tests) control
/// reproducibility; the engine never reaches for ambient entropy.
pub fn competitor_display_prices<R: Rng + ?Sized>(
    list_price: Decimal,
    bands: &BTreeMap<String, PriceBand>,
    rng: &mut R,
) -> Result<BTreeMap<String, Decimal>, DomainError> {
    if list_price < Decimal::ZERO {
        return Err(DomainError::NegativePrice { value: list_price });
    }
    let base = list_price.to_f64().ok_or_else(|| DomainError::InvalidInput {
        reason: format!("list price {list_price} not representable as f64"),
    })?;

    let mut prices = BTreeMap::new();
    for (name, band) in bands {
        let multiplier = rng.random_range(band.min..=band.max);
        let price = Decimal::from_f64(base * multiplier).ok_or_else(|| {
            DomainError::InvalidInput {
                reason: format!("competitor price for {name} overflowed"),
            }
        })?;
        prices.insert(name.clone(), round2(price));
    }
    Ok(prices)
}
