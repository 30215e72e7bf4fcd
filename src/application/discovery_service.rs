use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::catalog::{ListingCandidate, TrackedProduct};
use crate::domain::demand::DemandScorer;
use crate::domain::discovery::CriteriaFilter;
use crate::domain::ports::{ListingSyncService, MarketplaceService};
use crate::domain::pricing::{PricingConfig, competitor_display_prices, compute_list_price, compute_margin};
use crate::domain::repositories::ProductRepository;

/// Summary of one discovery pass
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub scanned: usize,
    pub rejected: usize,
    pub gate_failures: usize,
    pub imported: Vec<TrackedProduct>,
}

/// Runs one discovery pass: search the marketplace, qualify candidates
/// through the criteria filter and demand gate, price the survivors, persist
/// them and push the listings out.
pub struct DiscoveryService {
    marketplace: Arc<dyn MarketplaceService>,
    repository: Arc<dyn ProductRepository>,
    listing_sync: Arc<dyn ListingSyncService>,
    filter: CriteriaFilter,
    scorer: DemandScorer,
    pricing: PricingConfig,
    rank_history_days: u32,
    // Competitor display prices draw from here; seeded for reproducible runs.
    rng: Mutex<StdRng>,
}

impl DiscoveryService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        marketplace: Arc<dyn MarketplaceService>,
        repository: Arc<dyn ProductRepository>,
        listing_sync: Arc<dyn ListingSyncService>,
        filter: CriteriaFilter,
        scorer: DemandScorer,
        pricing: PricingConfig,
        rank_history_days: u32,
        rng_seed: Option<u64>,
    ) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            marketplace,
            repository,
            listing_sync,
            filter,
            scorer,
            pricing,
            rank_history_days,
            rng: Mutex::new(rng),
        }
    }

    pub async fn run_scan(
        &self,
        query: &str,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<DiscoveryReport> {
        let candidates = self.marketplace.search_listings(query, limit).await?;
        info!(
            "Discovery [{}]: {} raw candidates",
            query,
            candidates.len()
        );

        let mut report = DiscoveryReport {
            scanned: candidates.len(),
            ..DiscoveryReport::default()
        };

        let mut scored: Vec<(ListingCandidate, f64)> = Vec::new();
        for candidate in candidates {
            match self.filter.evaluate(&candidate) {
                Ok(verdict) => {
                    if let Some(reason) = verdict.rejection_reason() {
                        info!("Discovery: {} rejected - {}", candidate.item_id, reason);
                        report.rejected += 1;
                        continue;
                    }
                }
                Err(e) => {
                    warn!("Discovery: {} skipped, bad listing data: {}", candidate.item_id, e);
                    report.rejected += 1;
                    continue;
                }
            }

            let sample = self
                .marketplace
                .rank_history(&candidate.item_id, self.rank_history_days)
                .await?;
            match self.scorer.score(&sample, candidate.prime_eligible) {
                Ok(score) if score.passes_demand_gate => {
                    scored.push((candidate, score.score));
                }
                Ok(score) => {
                    info!(
                        "Discovery: {} failed demand gate (score {:.2})",
                        candidate.item_id, score.score
                    );
                    report.gate_failures += 1;
                }
                Err(e) => {
                    // Bad data is a rejection, not a demand-gate verdict.
                    warn!(
                        "Discovery: {} skipped, bad rank history: {}",
                        candidate.item_id, e
                    );
                    report.rejected += 1;
                }
            }
        }

        // Most attractive candidates first; the score is only a ranking signal.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        for (candidate, score) in scored {
            let list_price = compute_list_price(candidate.price, self.pricing.markup_percent)?;
            let margin = compute_margin(candidate.price, list_price)?;
            let competitor_prices = {
                let mut rng = self.rng.lock().await;
                competitor_display_prices(list_price, &self.pricing.competitor_bands, &mut *rng)?
            };

            let product = TrackedProduct::new(
                candidate.item_id.clone(),
                candidate.title.clone(),
                candidate.price,
                list_price,
                now,
            );
            self.repository.save(&product).await?;
            self.listing_sync
                .push_listing(&product, &competitor_prices)
                .await?;

            info!(
                "Discovery: imported {} at ${} (cost ${}, margin {:.1}%, score {:.2})",
                product.id,
                product.list_price,
                product.cost_price,
                margin.percent,
                score
            );
            report.imported.push(product);
        }

        info!(
            "Discovery [{}]: {} imported, {} rejected, {} demand-gate failures",
            query,
            report.imported.len(),
            report.rejected,
            report.gate_failures
        );
        Ok(report)
    }
}
