use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::catalog::{
    AlertSeverity, AutoAction, LifecycleStatus, MarginAlert, TrackedProduct,
};
use crate::domain::errors::DomainError;

/// Margin-degradation policy applied to every tracked product
#[derive(Debug, Clone)]
pub struct MarginPolicy {
    pub min_margin_percent: Decimal,
    /// How long a product may stay below the minimum before auto-pause
    pub grace_period: Duration,
}

impl MarginPolicy {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_margin_percent < Decimal::ZERO {
            return Err(format!(
                "Invalid min_margin_percent: {}",
                self.min_margin_percent
            ));
        }
        if self.grace_period < Duration::zero() {
            return Err(format!("Invalid grace_period: {}", self.grace_period));
        }
        Ok(())
    }
}

impl Default for MarginPolicy {
    fn default() -> Self {
        Self {
            min_margin_percent: dec!(30),
            grace_period: Duration::hours(24),
        }
    }
}

/// Outcome of one margin evaluation: the updated record plus alerts for the
/// host to deliver. The input product is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginEvaluation {
    pub product: TrackedProduct,
    pub alerts: Vec<MarginAlert>,
}

/// Two-state machine per product: Healthy (`margin_below_threshold_since` is
/// `None`) and Degraded (`Some(since)`).
///
/// Transitions, evaluated once per sync cycle with an explicit `now`:
/// - Healthy -> Degraded when margin drops below the minimum: stamp `now`,
///   emit a warning.
/// - Degraded past the grace period: pause the product, emit a critical alert
///   with `auto_action = paused`. Terminal: a paused product is never
///   auto-reactivated here, only by manual action.
/// - Degraded -> Healthy on recovery: clear the stamp silently; a paused
///   product stays paused.
pub struct MarginMonitor {
    policy: MarginPolicy,
}

impl MarginMonitor {
    pub fn new(policy: MarginPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MarginPolicy {
        &self.policy
    }

    /// Pure given `now`; never reads a system clock. The caller guarantees a
    /// non-decreasing `now` per product and serializes overlapping cycles.
    pub fn evaluate(
        &self,
        product: &TrackedProduct,
        new_margin_percent: Decimal,
        now: DateTime<Utc>,
    ) -> Result<MarginEvaluation, DomainError> {
        if let Some(since) = product.margin_below_threshold_since {
            if since > now {
                return Err(DomainError::ClockWentBackwards { since, now });
            }
        }

        let mut updated = product.clone();
        let mut alerts = Vec::new();

        if new_margin_percent >= self.policy.min_margin_percent {
            // Silent recovery; pause is sticky.
            updated.margin_below_threshold_since = None;
            return Ok(MarginEvaluation {
                product: updated,
                alerts,
            });
        }

        if updated.lifecycle_status == LifecycleStatus::Paused {
            // Terminal state: keep the invariant on the stamp, raise nothing.
            updated.margin_below_threshold_since.get_or_insert(now);
        } else {
            match updated.margin_below_threshold_since {
                None => {
                    updated.margin_below_threshold_since = Some(now);
                    alerts.push(MarginAlert {
                        product_id: updated.id.clone(),
                        severity: AlertSeverity::Warning,
                        margin_percent: new_margin_percent,
                        auto_action: None,
                        occurred_at: now,
                    });
                }
                Some(since) if now - since >= self.policy.grace_period => {
                    updated.lifecycle_status = LifecycleStatus::Paused;
                    alerts.push(MarginAlert {
                        product_id: updated.id.clone(),
                        severity: AlertSeverity::Critical,
                        margin_percent: new_margin_percent,
                        auto_action: Some(AutoAction::Paused),
                        occurred_at: now,
                    });
                }
                // Still inside the grace window: no repeat warning.
                Some(_) => {}
            }
        }

        Ok(MarginEvaluation {
            product: updated,
            alerts,
        })
    }
}
