use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// One observation of a marketplace sales rank. Lower rank = more sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankPoint {
    pub timestamp: DateTime<Utc>,
    pub sales_rank: u64,
}

/// Sales-rank history for one item over a bounded window (e.g. 90 days).
///
/// Points are ordered by ascending timestamp with no duplicates; the
/// constructor enforces this so downstream consumers can rely on it.
/// The scorer only reads the sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandSample {
    item_id: String,
    points: Vec<RankPoint>,
}

impl DemandSample {
    pub fn new(
        item_id: impl Into<String>,
        points: Vec<RankPoint>,
    ) -> Result<Self, DomainError> {
        let item_id = item_id.into();
        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(DomainError::UnorderedSample { item_id });
            }
        }
        Ok(Self { item_id, points })
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn points(&self) -> &[RankPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
