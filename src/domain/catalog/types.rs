use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw marketplace listing as returned by the search port.
///
/// Ephemeral: candidates live for one discovery pass and are either rejected
/// or promoted into a [`TrackedProduct`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCandidate {
    /// Marketplace item id (e.g. an ASIN)
    pub item_id: String,
    pub title: String,
    /// Source price in currency minor-unit precision
    pub price: Decimal,
    /// Star rating, 0.0-5.0
    pub rating: f64,
    pub review_count: u32,
    pub prime_eligible: bool,
    /// Free-form availability text; interpreted, never matched verbatim
    pub availability_text: String,
}

/// Lifecycle state of a tracked product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStatus {
    Active,
    Paused,
    OutOfStock,
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleStatus::Active => write!(f, "ACTIVE"),
            LifecycleStatus::Paused => write!(f, "PAUSED"),
            LifecycleStatus::OutOfStock => write!(f, "OUT_OF_STOCK"),
        }
    }
}

/// A product imported by discovery and kept in sync against its source
/// listing.
///
/// `margin_below_threshold_since` is `Some` exactly when the most recently
/// evaluated margin was below the configured minimum; it is set and cleared
/// only by the margin monitor, per evaluation call, with no smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedProduct {
    pub id: String,
    pub title: String,
    /// Source cost, >= 0
    pub cost_price: Decimal,
    /// Current retail price, >= 0
    pub list_price: Decimal,
    pub margin_below_threshold_since: Option<DateTime<Utc>>,
    pub lifecycle_status: LifecycleStatus,
    pub created_at: DateTime<Utc>,
}

impl TrackedProduct {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        cost_price: Decimal,
        list_price: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cost_price,
            list_price,
            margin_below_threshold_since: None,
            lifecycle_status: LifecycleStatus::Active,
            created_at,
        }
    }

    /// Whether the product is currently inside a margin-degradation window
    pub fn is_degraded(&self) -> bool {
        self.margin_below_threshold_since.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

/// Automatic action taken by the margin monitor alongside an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoAction {
    Paused,
}

impl fmt::Display for AutoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoAction::Paused => write!(f, "paused"),
        }
    }
}

/// Alert emitted by the margin monitor, handed to the host for delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginAlert {
    pub product_id: String,
    pub severity: AlertSeverity,
    pub margin_percent: Decimal,
    pub auto_action: Option<AutoAction>,
    pub occurred_at: DateTime<Utc>,
}
