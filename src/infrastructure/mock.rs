//! Mock marketplace and listing-sync implementations for demos and tests.

use crate::domain::catalog::{
    DemandSample, LifecycleStatus, ListingCandidate, RankPoint, TrackedProduct,
};
use crate::domain::ports::{ListingSyncService, MarketplaceService};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory marketplace with canned listings and rank histories. Listings
/// can be mutated between cycles to simulate cost hikes and stockouts.
#[derive(Clone, Default)]
pub struct MockMarketplaceService {
    listings: Arc<RwLock<HashMap<String, ListingCandidate>>>,
    histories: Arc<RwLock<HashMap<String, Vec<u64>>>>,
}

impl MockMarketplaceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_listing(&self, listing: ListingCandidate, rank_history: Vec<u64>) {
        self.histories
            .write()
            .await
            .insert(listing.item_id.clone(), rank_history);
        self.listings
            .write()
            .await
            .insert(listing.item_id.clone(), listing);
    }

    /// Simulate a source cost change
    pub async fn set_price(&self, item_id: &str, price: Decimal) {
        if let Some(listing) = self.listings.write().await.get_mut(item_id) {
            listing.price = price;
        }
    }

    /// Simulate an availability change
    pub async fn set_availability(&self, item_id: &str, text: &str) {
        if let Some(listing) = self.listings.write().await.get_mut(item_id) {
            listing.availability_text = text.to_string();
        }
    }
}

#[async_trait]
impl MarketplaceService for MockMarketplaceService {
    async fn search_listings(&self, _query: &str, limit: usize) -> Result<Vec<ListingCandidate>> {
        let listings = self.listings.read().await;
        let mut results: Vec<ListingCandidate> = listings.values().cloned().collect();
        results.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        results.truncate(limit);
        Ok(results)
    }

    async fn lookup_listing(&self, item_id: &str) -> Result<Option<ListingCandidate>> {
        Ok(self.listings.read().await.get(item_id).cloned())
    }

    async fn rank_history(&self, item_id: &str, days: u32) -> Result<DemandSample> {
        let histories = self.histories.read().await;
        let ranks = histories.get(item_id).cloned().unwrap_or_default();

        // One point per day, most recent last, trimmed to the window.
        let start = Utc::now() - Duration::days(ranks.len() as i64);
        let points: Vec<RankPoint> = ranks
            .iter()
            .enumerate()
            .skip(ranks.len().saturating_sub(days as usize))
            .map(|(i, &sales_rank)| RankPoint {
                timestamp: start + Duration::days(i as i64),
                sales_rank,
            })
            .collect();
        Ok(DemandSample::new(item_id, points)?)
    }
}

/// Listing-sync double that records every push and status update.
#[derive(Clone, Default)]
pub struct RecordingListingSyncService {
    pushes: Arc<RwLock<Vec<(TrackedProduct, BTreeMap<String, Decimal>)>>>,
    status_updates: Arc<RwLock<Vec<(String, LifecycleStatus)>>>,
}

impl RecordingListingSyncService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn pushes(&self) -> Vec<(TrackedProduct, BTreeMap<String, Decimal>)> {
        self.pushes.read().await.clone()
    }

    pub async fn status_updates(&self) -> Vec<(String, LifecycleStatus)> {
        self.status_updates.read().await.clone()
    }
}

#[async_trait]
impl ListingSyncService for RecordingListingSyncService {
    async fn push_listing(
        &self,
        product: &TrackedProduct,
        competitor_prices: &BTreeMap<String, Decimal>,
    ) -> Result<()> {
        info!(
            "ListingSync: pushing {} at ${} ({} competitor columns)",
            product.id,
            product.list_price,
            competitor_prices.len()
        );
        self.pushes
            .write()
            .await
            .push((product.clone(), competitor_prices.clone()));
        Ok(())
    }

    async fn update_status(&self, product_id: &str, status: LifecycleStatus) -> Result<()> {
        info!("ListingSync: {} -> {}", product_id, status);
        self.status_updates
            .write()
            .await
            .push((product_id.to_string(), status));
        Ok(())
    }
}
