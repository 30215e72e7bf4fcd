use crate::domain::catalog::{DemandSample, LifecycleStatus, ListingCandidate, TrackedProduct};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

// Need async_trait for async functions in traits
#[async_trait]
pub trait MarketplaceService: Send + Sync {
    /// Search the source marketplace for raw listing candidates
    async fn search_listings(&self, query: &str, limit: usize) -> Result<Vec<ListingCandidate>>;

    /// Look up the current state of one listing by marketplace item id
    async fn lookup_listing(&self, item_id: &str) -> Result<Option<ListingCandidate>>;

    /// Sales-rank history for one item over the trailing window
    async fn rank_history(&self, item_id: &str, days: u32) -> Result<DemandSample>;
}

#[async_trait]
pub trait ListingSyncService: Send + Sync {
    /// Propagate a priced product and its competitor display prices to the
    /// storefront
    async fn push_listing(
        &self,
        product: &TrackedProduct,
        competitor_prices: &BTreeMap<String, Decimal>,
    ) -> Result<()>;

    /// Propagate a lifecycle status change to the storefront
    async fn update_status(&self, product_id: &str, status: LifecycleStatus) -> Result<()>;
}
