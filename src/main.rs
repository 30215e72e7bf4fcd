//! Dropline - headless discovery & pricing runner
//!
//! Runs one discovery scan and one price-sync cycle against the mock
//! marketplace, logging every decision. Real marketplace and storefront
//! clients plug in behind the `MarketplaceService` / `ListingSyncService`
//! ports.
//!
//! # Usage
//! ```sh
//! MARKUP_PERCENT=70 MIN_MARGIN_PERCENT=30 cargo run
//! ```

use anyhow::Result;
use chrono::Utc;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

use dropline::application::discovery_service::DiscoveryService;
use dropline::application::price_sync_service::PriceSyncService;
use dropline::config::Config;
use dropline::domain::catalog::ListingCandidate;
use dropline::domain::demand::DemandScorer;
use dropline::domain::discovery::{AmazonAvailability, CriteriaFilter};
use dropline::domain::pricing::MarginMonitor;
use dropline::infrastructure::{
    InMemoryProductRepository, MockMarketplaceService, RecordingListingSyncService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Dropline {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: query={:?}, markup={}%, min margin={}%",
        config.scan_query, config.markup_percent, config.min_margin_percent
    );

    let marketplace = Arc::new(MockMarketplaceService::new());
    seed_demo_listings(&marketplace).await;

    let repository = Arc::new(InMemoryProductRepository::new());
    let listing_sync = Arc::new(RecordingListingSyncService::new());
    let availability = Arc::new(AmazonAvailability);

    let discovery = DiscoveryService::new(
        marketplace.clone(),
        repository.clone(),
        listing_sync.clone(),
        CriteriaFilter::new(config.to_discovery_criteria()?, availability.clone()),
        DemandScorer::new(config.to_demand_config()?),
        config.to_pricing_config()?,
        config.rank_history_days,
        config.competitor_price_seed,
    );

    let price_sync = PriceSyncService::new(
        marketplace.clone(),
        repository.clone(),
        listing_sync.clone(),
        MarginMonitor::new(config.to_margin_policy()?),
        availability,
    );

    let report = discovery
        .run_scan(&config.scan_query, config.scan_limit, Utc::now())
        .await?;
    info!(
        "Scan complete: {}/{} candidates imported",
        report.imported.len(),
        report.scanned
    );

    // Simulate a supplier cost hike before the sync cycle so the margin
    // monitor has something to flag.
    if let Some(product) = report.imported.first() {
        let hiked = product.cost_price * dec!(1.6);
        info!(
            "Demo: hiking source cost of {} from ${} to ${}",
            product.id, product.cost_price, hiked
        );
        marketplace.set_price(&product.id, hiked).await;
    }

    let sync_report = price_sync.run_cycle(Utc::now()).await?;
    info!(
        "Sync complete: {} evaluated, {} alerts",
        sync_report.evaluated,
        sync_report.alerts.len()
    );
    if !sync_report.alerts.is_empty() {
        info!("Alerts: {}", serde_json::to_string_pretty(&sync_report.alerts)?);
    }

    Ok(())
}

/// A handful of canned listings exercising each rejection path
async fn seed_demo_listings(marketplace: &MockMarketplaceService) {
    let listings = [
        (
            ListingCandidate {
                item_id: "B0SPATULA".to_string(),
                title: "Silicone Spatula Set".to_string(),
                price: dec!(14.99),
                rating: 4.6,
                review_count: 2_340,
                prime_eligible: true,
                availability_text: "In Stock.".to_string(),
            },
            vec![42_000, 40_500, 41_200, 39_800],
        ),
        (
            ListingCandidate {
                item_id: "B0PEELER".to_string(),
                title: "Julienne Peeler (Renewed)".to_string(),
                price: dec!(9.99),
                rating: 4.1,
                review_count: 870,
                prime_eligible: true,
                availability_text: "In Stock.".to_string(),
            },
            vec![55_000, 56_000],
        ),
        (
            ListingCandidate {
                item_id: "B0WHISK".to_string(),
                title: "Balloon Whisk".to_string(),
                price: dec!(7.49),
                rating: 3.1,
                review_count: 1_200,
                prime_eligible: true,
                availability_text: "In Stock.".to_string(),
            },
            vec![60_000, 61_000],
        ),
        (
            ListingCandidate {
                item_id: "B0TONGS".to_string(),
                title: "Locking Kitchen Tongs".to_string(),
                price: dec!(11.25),
                rating: 4.4,
                review_count: 650,
                prime_eligible: true,
                availability_text: "Usually ships within 6 to 10 months.".to_string(),
            },
            vec![30_000, 31_000],
        ),
    ];

    for (listing, ranks) in listings {
        marketplace.add_listing(listing, ranks).await;
    }
}
