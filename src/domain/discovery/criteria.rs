use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::domain::catalog::ListingCandidate;
use crate::domain::discovery::availability::AvailabilityInterpreter;
use crate::domain::errors::DomainError;

/// Why a candidate was rejected. Reasons are stable strings used in logs and
/// metrics, and always name the first failing check in the fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    OutOfStock,
    PriceOutOfRange,
    RatingTooLow,
    TooFewReviews,
    NotPrime,
    ExcludedBrand,
    ExcludedCondition,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RejectReason::OutOfStock => "out of stock",
            RejectReason::PriceOutOfRange => "price out of range",
            RejectReason::RatingTooLow => "rating too low",
            RejectReason::TooFewReviews => "too few reviews",
            RejectReason::NotPrime => "not prime eligible",
            RejectReason::ExcludedBrand => "excluded brand",
            RejectReason::ExcludedCondition => "excluded condition",
        };
        write!(f, "{label}")
    }
}

/// Result of running a candidate through the criteria filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaVerdict {
    /// Candidate qualifies for import
    Pass,
    /// Candidate is rejected; carries the first failing check's reason
    Reject(RejectReason),
}

impl CriteriaVerdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, CriteriaVerdict::Pass)
    }

    pub fn rejection_reason(&self) -> Option<RejectReason> {
        match self {
            CriteriaVerdict::Pass => None,
            CriteriaVerdict::Reject(reason) => Some(*reason),
        }
    }
}

/// Discovery qualification thresholds. Price and rating bounds are inclusive.
#[derive(Debug, Clone)]
pub struct DiscoveryCriteria {
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_reviews: u32,
    pub min_rating: f64,
    pub require_prime: bool,
    /// Case-insensitive substrings matched against the title
    pub excluded_brands: Vec<String>,
    /// Case-insensitive substrings matched against title and availability text
    pub excluded_conditions: Vec<String>,
}

impl DiscoveryCriteria {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_price < Decimal::ZERO {
            return Err(format!("Invalid min_price: {}", self.min_price));
        }
        if self.max_price < self.min_price {
            return Err(format!(
                "max_price {} below min_price {}",
                self.max_price, self.min_price
            ));
        }
        if !(0.0..=5.0).contains(&self.min_rating) {
            return Err(format!("Invalid min_rating: {}", self.min_rating));
        }
        Ok(())
    }
}

impl Default for DiscoveryCriteria {
    fn default() -> Self {
        Self {
            min_price: dec!(3),
            max_price: dec!(25),
            min_reviews: 500,
            min_rating: 3.5,
            require_prime: true,
            excluded_brands: Vec::new(),
            excluded_conditions: vec![
                "refurbished".to_string(),
                "renewed".to_string(),
                "used".to_string(),
                "open box".to_string(),
            ],
        }
    }
}

/// Pure predicate deciding whether a listing qualifies for import.
///
/// Checks run in a fixed order (availability, price, rating, reviews, prime,
/// exclusions) and the first failure determines the rejection reason, so
/// reasons are reproducible for a given candidate and criteria.
pub struct CriteriaFilter {
    criteria: DiscoveryCriteria,
    availability: Arc<dyn AvailabilityInterpreter>,
}

impl CriteriaFilter {
    pub fn new(
        criteria: DiscoveryCriteria,
        availability: Arc<dyn AvailabilityInterpreter>,
    ) -> Self {
        Self {
            criteria,
            availability,
        }
    }

    pub fn criteria(&self) -> &DiscoveryCriteria {
        &self.criteria
    }

    /// Evaluate a candidate. Malformed candidates (negative price, rating
    /// outside [0, 5]) are `InvalidInput`, not a rejection.
    pub fn evaluate(&self, candidate: &ListingCandidate) -> Result<CriteriaVerdict, DomainError> {
        if candidate.price < Decimal::ZERO {
            return Err(DomainError::NegativePrice {
                value: candidate.price,
            });
        }
        if !candidate.rating.is_finite() || !(0.0..=5.0).contains(&candidate.rating) {
            return Err(DomainError::RatingOutOfRange {
                value: candidate.rating,
            });
        }

        // Fixed order; first failing check wins.
        let checks = [
            Self::check_availability,
            Self::check_price,
            Self::check_rating,
            Self::check_reviews,
            Self::check_prime,
            Self::check_exclusions,
        ];
        for check in checks {
            if let Some(reason) = check(self, candidate) {
                return Ok(CriteriaVerdict::Reject(reason));
            }
        }
        Ok(CriteriaVerdict::Pass)
    }

    fn check_availability(&self, candidate: &ListingCandidate) -> Option<RejectReason> {
        if self.availability.in_stock(&candidate.availability_text) {
            None
        } else {
            Some(RejectReason::OutOfStock)
        }
    }

    fn check_price(&self, candidate: &ListingCandidate) -> Option<RejectReason> {
        if candidate.price < self.criteria.min_price || candidate.price > self.criteria.max_price {
            Some(RejectReason::PriceOutOfRange)
        } else {
            None
        }
    }

    fn check_rating(&self, candidate: &ListingCandidate) -> Option<RejectReason> {
        if candidate.rating < self.criteria.min_rating {
            Some(RejectReason::RatingTooLow)
        } else {
            None
        }
    }

    fn check_reviews(&self, candidate: &ListingCandidate) -> Option<RejectReason> {
        if candidate.review_count < self.criteria.min_reviews {
            Some(RejectReason::TooFewReviews)
        } else {
            None
        }
    }

    fn check_prime(&self, candidate: &ListingCandidate) -> Option<RejectReason> {
        if self.criteria.require_prime && !candidate.prime_eligible {
            Some(RejectReason::NotPrime)
        } else {
            None
        }
    }

    fn check_exclusions(&self, candidate: &ListingCandidate) -> Option<RejectReason> {
        let title = candidate.title.to_lowercase();
        let availability = candidate.availability_text.to_lowercase();

        if self
            .criteria
            .excluded_brands
            .iter()
            .any(|brand| title.contains(&brand.to_lowercase()))
        {
            return Some(RejectReason::ExcludedBrand);
        }
        if self.criteria.excluded_conditions.iter().any(|condition| {
            let needle = condition.to_lowercase();
            title.contains(&needle) || availability.contains(&needle)
        }) {
            return Some(RejectReason::ExcludedCondition);
        }
        None
    }
}
