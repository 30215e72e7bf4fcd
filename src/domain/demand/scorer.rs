use crate::domain::catalog::DemandSample;
use crate::domain::errors::DomainError;

/// Demand gate thresholds and score weighting
#[derive(Debug, Clone)]
pub struct DemandConfig {
    /// Worst acceptable average sales rank (lower rank = more sales)
    pub max_acceptable_rank: u64,
    /// Max tolerated (max - min) / avg spread, 0-1
    pub max_volatility_fraction: f64,
    /// Score multiplier applied when the candidate is prime eligible
    pub prime_multiplier: f64,
}

impl DemandConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_acceptable_rank == 0 {
            return Err("max_acceptable_rank must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.max_volatility_fraction) {
            return Err(format!(
                "Invalid max_volatility_fraction: {}",
                self.max_volatility_fraction
            ));
        }
        if self.prime_multiplier <= 0.0 || !self.prime_multiplier.is_finite() {
            return Err(format!("Invalid prime_multiplier: {}", self.prime_multiplier));
        }
        Ok(())
    }
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            max_acceptable_rank: 100_000,
            max_volatility_fraction: 0.5,
            prime_multiplier: 1.0,
        }
    }
}

/// Scoring outcome. The gate is the pass/fail decision; the score is only a
/// relative ranking signal and has no fixed upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandScore {
    pub score: f64,
    pub passes_demand_gate: bool,
}

impl DemandScore {
    /// Expected, recoverable outcome for samples too short to score
    pub fn insufficient_data() -> Self {
        Self {
            score: 0.0,
            passes_demand_gate: false,
        }
    }
}

/// Scores sales-rank history into a relative desirability signal.
///
/// Reads the sample, performs no I/O.
pub struct DemandScorer {
    config: DemandConfig,
}

impl DemandScorer {
    pub fn new(config: DemandConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DemandConfig {
        &self.config
    }

    pub fn score(
        &self,
        sample: &DemandSample,
        prime_eligible: bool,
    ) -> Result<DemandScore, DomainError> {
        if sample.len() < 2 {
            return Ok(DemandScore::insufficient_data());
        }

        let ranks: Vec<f64> = sample
            .points()
            .iter()
            .map(|p| p.sales_rank as f64)
            .collect();
        let avg_rank = ranks.iter().sum::<f64>() / ranks.len() as f64;
        if avg_rank <= 0.0 {
            return Err(DomainError::NonPositiveRank {
                item_id: sample.item_id().to_string(),
            });
        }

        let max = ranks.iter().cloned().fold(f64::MIN, f64::max);
        let min = ranks.iter().cloned().fold(f64::MAX, f64::min);
        let volatility = (max - min) / avg_rank;

        let passes_demand_gate = avg_rank <= self.config.max_acceptable_rank as f64
            && volatility <= self.config.max_volatility_fraction;

        let prime_factor = if prime_eligible {
            self.config.prime_multiplier
        } else {
            1.0
        };
        let score =
            (self.config.max_acceptable_rank as f64 / avg_rank) * (1.0 - volatility) * prime_factor;

        Ok(DemandScore {
            score,
            passes_demand_gate,
        })
    }
}
