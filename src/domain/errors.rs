use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Malformed inputs rejected by the decision core.
///
/// These are never silently coerced: the caller gets the error and the
/// offending values, and no partial mutation has taken place.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    #[error("Negative price: {value}")]
    NegativePrice { value: Decimal },

    #[error("Negative cost price: {value}")]
    NegativeCost { value: Decimal },

    #[error("Negative markup percent: {value}")]
    NegativeMarkup { value: Decimal },

    #[error("Rating {value} outside valid range [0, 5]")]
    RatingOutOfRange { value: f64 },

    #[error("Demand sample for {item_id} is not ordered by ascending timestamp")]
    UnorderedSample { item_id: String },

    #[error("Demand sample for {item_id} has non-positive average rank")]
    NonPositiveRank { item_id: String },

    #[error("Competitor price band is invalid: [{min}, {max}]")]
    InvalidPriceBand { min: f64, max: f64 },

    #[error("Margin clock went backwards: below-threshold since {since}, now {now}")]
    ClockWentBackwards {
        since: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}
