use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::catalog::{AlertSeverity, LifecycleStatus, MarginAlert};
use crate::domain::discovery::AvailabilityInterpreter;
use crate::domain::ports::{ListingSyncService, MarketplaceService};
use crate::domain::pricing::{MarginMonitor, compute_margin};
use crate::domain::repositories::ProductRepository;

/// Summary of one price-sync cycle
#[derive(Debug, Default)]
pub struct SyncReport {
    pub evaluated: usize,
    pub skipped: usize,
    pub paused: usize,
    pub out_of_stock: usize,
    pub alerts: Vec<MarginAlert>,
}

/// Re-evaluates every tracked product against its current source listing:
/// refreshes the cost, recomputes the margin at the current list price, runs
/// the margin monitor and propagates lifecycle changes to the storefront.
///
/// Invoked at most once per product per cycle; callers provide a
/// non-decreasing `now` and serialize overlapping cycles, otherwise the
/// grace-period clock could be reset or extended incorrectly.
pub struct PriceSyncService {
    marketplace: Arc<dyn MarketplaceService>,
    repository: Arc<dyn ProductRepository>,
    listing_sync: Arc<dyn ListingSyncService>,
    monitor: MarginMonitor,
    availability: Arc<dyn AvailabilityInterpreter>,
}

impl PriceSyncService {
    pub fn new(
        marketplace: Arc<dyn MarketplaceService>,
        repository: Arc<dyn ProductRepository>,
        listing_sync: Arc<dyn ListingSyncService>,
        monitor: MarginMonitor,
        availability: Arc<dyn AvailabilityInterpreter>,
    ) -> Self {
        Self {
            marketplace,
            repository,
            listing_sync,
            monitor,
            availability,
        }
    }

    pub async fn run_cycle(&self, now: DateTime<Utc>) -> Result<SyncReport> {
        let products = self.repository.get_all().await?;
        info!("Price sync: evaluating {} products", products.len());

        let mut report = SyncReport::default();
        for product in products {
            let listing = match self.marketplace.lookup_listing(&product.id).await? {
                Some(listing) => listing,
                None => {
                    warn!(
                        "Price sync: {} no longer found at source, skipping",
                        product.id
                    );
                    continue;
                }
            };

            let mut current = product.clone();

            // Availability drives the OutOfStock status independently of
            // margin; pause outranks stock state.
            let in_stock = self.availability.in_stock(&listing.availability_text);
            if !in_stock {
                if current.lifecycle_status == LifecycleStatus::Active {
                    current.lifecycle_status = LifecycleStatus::OutOfStock;
                    self.listing_sync
                        .update_status(&current.id, current.lifecycle_status)
                        .await?;
                    warn!("Price sync: {} out of stock at source", current.id);
                    report.out_of_stock += 1;
                }
            } else if current.lifecycle_status == LifecycleStatus::OutOfStock {
                current.lifecycle_status = LifecycleStatus::Active;
                self.listing_sync
                    .update_status(&current.id, current.lifecycle_status)
                    .await?;
                info!("Price sync: {} back in stock at source", current.id);
            }

            current.cost_price = listing.price;
            // Bad source data skips this entry, never the whole cycle.
            let evaluation = match compute_margin(current.cost_price, current.list_price)
                .and_then(|margin| self.monitor.evaluate(&current, margin.percent, now))
            {
                Ok(evaluation) => evaluation,
                Err(e) => {
                    warn!(
                        "Price sync: {} skipped, bad listing data: {}",
                        current.id, e
                    );
                    report.skipped += 1;
                    continue;
                }
            };
            report.evaluated += 1;

            if evaluation.product.lifecycle_status == LifecycleStatus::Paused
                && current.lifecycle_status != LifecycleStatus::Paused
            {
                self.listing_sync
                    .update_status(&evaluation.product.id, LifecycleStatus::Paused)
                    .await?;
                report.paused += 1;
            }

            for alert in &evaluation.alerts {
                match alert.severity {
                    AlertSeverity::Warning => warn!(
                        "Margin alert: {} at {:.1}% (below minimum {})",
                        alert.product_id,
                        alert.margin_percent,
                        self.monitor.policy().min_margin_percent
                    ),
                    AlertSeverity::Critical => error!(
                        "Margin alert: {} at {:.1}%, grace period expired, auto-paused",
                        alert.product_id, alert.margin_percent
                    ),
                }
            }

            self.repository.save(&evaluation.product).await?;
            report.alerts.extend(evaluation.alerts);
        }

        info!(
            "Price sync: {} evaluated, {} skipped, {} paused, {} out of stock, {} alerts",
            report.evaluated,
            report.skipped,
            report.paused,
            report.out_of_stock,
            report.alerts.len()
        );
        Ok(report)
    }
}
