//! End-to-end flows through the application services: discovery scan with
//! qualification, pricing and listing push, then sync cycles driving the
//! margin grace period and stock flips with injected timestamps.

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::sync::Arc;

use dropline::application::discovery_service::DiscoveryService;
use dropline::application::price_sync_service::PriceSyncService;
use dropline::domain::catalog::{AlertSeverity, AutoAction, LifecycleStatus, ListingCandidate};
use dropline::domain::demand::{DemandConfig, DemandScorer};
use dropline::domain::discovery::{AmazonAvailability, CriteriaFilter, DiscoveryCriteria};
use dropline::domain::pricing::{MarginMonitor, MarginPolicy, PriceBand, PricingConfig};
use dropline::domain::repositories::ProductRepository;
use dropline::infrastructure::{
    InMemoryProductRepository, MockMarketplaceService, RecordingListingSyncService,
};

struct Harness {
    marketplace: Arc<MockMarketplaceService>,
    repository: Arc<InMemoryProductRepository>,
    listing_sync: Arc<RecordingListingSyncService>,
    discovery: DiscoveryService,
    price_sync: PriceSyncService,
}

fn harness(rng_seed: u64) -> Harness {
    let marketplace = Arc::new(MockMarketplaceService::new());
    let repository = Arc::new(InMemoryProductRepository::new());
    let listing_sync = Arc::new(RecordingListingSyncService::new());
    let availability = Arc::new(AmazonAvailability);

    let pricing = PricingConfig {
        markup_percent: dec!(70),
        competitor_bands: BTreeMap::from([
            ("amazon".to_string(), PriceBand::new(1.82, 1.88).unwrap()),
            ("costco".to_string(), PriceBand::new(1.80, 1.85).unwrap()),
            ("ebay".to_string(), PriceBand::new(1.87, 1.93).unwrap()),
        ]),
    };

    let discovery = DiscoveryService::new(
        marketplace.clone(),
        repository.clone(),
        listing_sync.clone(),
        CriteriaFilter::new(DiscoveryCriteria::default(), availability.clone()),
        DemandScorer::new(DemandConfig::default()),
        pricing,
        90,
        Some(rng_seed),
    );
    let price_sync = PriceSyncService::new(
        marketplace.clone(),
        repository.clone(),
        listing_sync.clone(),
        MarginMonitor::new(MarginPolicy::default()),
        availability,
    );

    Harness {
        marketplace,
        repository,
        listing_sync,
        discovery,
        price_sync,
    }
}

fn widget() -> ListingCandidate {
    ListingCandidate {
        item_id: "B0WIDGET".to_string(),
        title: "Generic Widget".to_string(),
        price: dec!(15),
        rating: 4.2,
        review_count: 800,
        prime_eligible: true,
        availability_text: "In Stock.".to_string(),
    }
}

#[tokio::test]
async fn scan_qualifies_prices_and_pushes_the_good_candidate() {
    let h = harness(42);
    h.marketplace
        .add_listing(widget(), vec![40_000, 41_000, 39_500])
        .await;
    // Rejected by the criteria filter (condition exclusion)
    h.marketplace
        .add_listing(
            ListingCandidate {
                item_id: "B0RENEWED".to_string(),
                title: "Generic Widget (Renewed)".to_string(),
                ..widget()
            },
            vec![20_000, 21_000],
        )
        .await;
    // Passes the filter, fails the demand gate on volatility
    h.marketplace
        .add_listing(
            ListingCandidate {
                item_id: "B0SPIKY".to_string(),
                title: "Spiky Seller".to_string(),
                ..widget()
            },
            vec![5_000, 95_000],
        )
        .await;

    let report = h.discovery.run_scan("widgets", 50, Utc::now()).await.unwrap();

    assert_eq!(report.scanned, 3);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.gate_failures, 1);
    assert_eq!(report.imported.len(), 1);

    // cost $15 at 70% markup lists at $25.50
    let product = &report.imported[0];
    assert_eq!(product.id, "B0WIDGET");
    assert_eq!(product.cost_price, dec!(15));
    assert_eq!(product.list_price, dec!(25.50));
    assert_eq!(product.lifecycle_status, LifecycleStatus::Active);
    assert!(!product.is_degraded());

    assert_eq!(h.repository.count().await.unwrap(), 1);

    let pushes = h.listing_sync.pushes().await;
    assert_eq!(pushes.len(), 1);
    let (pushed, competitor_prices) = &pushes[0];
    assert_eq!(pushed.id, "B0WIDGET");
    assert_eq!(competitor_prices.len(), 3);
    // every column reads higher than our list price
    for price in competitor_prices.values() {
        assert!(*price > pushed.list_price);
    }
}

#[tokio::test]
async fn same_seed_produces_identical_competitor_prices() {
    let mut runs = Vec::new();
    for _ in 0..2 {
        let h = harness(7);
        h.marketplace
            .add_listing(widget(), vec![40_000, 41_000, 39_500])
            .await;
        h.discovery.run_scan("widgets", 50, Utc::now()).await.unwrap();
        let pushes = h.listing_sync.pushes().await;
        runs.push(pushes[0].1.clone());
    }
    assert_eq!(runs[0], runs[1]);
}

#[tokio::test]
async fn cost_hike_warns_then_pauses_after_grace_period() {
    let h = harness(42);
    h.marketplace
        .add_listing(widget(), vec![40_000, 41_000, 39_500])
        .await;

    let t0 = Utc::now();
    h.discovery.run_scan("widgets", 50, t0).await.unwrap();

    // Supplier raises the cost: margin on the $25.50 list drops to ~21.6%,
    // below the 30% minimum.
    h.marketplace.set_price("B0WIDGET", dec!(20)).await;

    let report = h.price_sync.run_cycle(t0).await.unwrap();
    assert_eq!(report.evaluated, 1);
    assert_eq!(report.paused, 0);
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].severity, AlertSeverity::Warning);
    assert_eq!(report.alerts[0].auto_action, None);

    let product = h.repository.find_by_id("B0WIDGET").await.unwrap().unwrap();
    assert_eq!(product.cost_price, dec!(20));
    assert_eq!(product.margin_below_threshold_since, Some(t0));
    assert_eq!(product.lifecycle_status, LifecycleStatus::Active);

    // Inside the grace window: no repeat warning, no pause.
    let report = h.price_sync.run_cycle(t0 + Duration::hours(12)).await.unwrap();
    assert!(report.alerts.is_empty());
    assert_eq!(report.paused, 0);

    // Grace period expired: auto-pause with a critical alert.
    let t_expiry = t0 + Duration::hours(24) + Duration::seconds(1);
    let report = h.price_sync.run_cycle(t_expiry).await.unwrap();
    assert_eq!(report.paused, 1);
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].severity, AlertSeverity::Critical);
    assert_eq!(report.alerts[0].auto_action, Some(AutoAction::Paused));

    let product = h.repository.find_by_id("B0WIDGET").await.unwrap().unwrap();
    assert_eq!(product.lifecycle_status, LifecycleStatus::Paused);

    let updates = h.listing_sync.status_updates().await;
    assert_eq!(
        updates.last(),
        Some(&("B0WIDGET".to_string(), LifecycleStatus::Paused))
    );

    // Pause is sticky and silent, even once the margin recovers.
    h.marketplace.set_price("B0WIDGET", dec!(15)).await;
    let report = h.price_sync.run_cycle(t_expiry + Duration::hours(1)).await.unwrap();
    assert!(report.alerts.is_empty());
    assert_eq!(report.paused, 0);
    let product = h.repository.find_by_id("B0WIDGET").await.unwrap().unwrap();
    assert_eq!(product.lifecycle_status, LifecycleStatus::Paused);
    assert!(!product.is_degraded());
}

#[tokio::test]
async fn stock_flips_follow_source_availability_but_never_unpause() {
    let h = harness(42);
    h.marketplace
        .add_listing(widget(), vec![40_000, 41_000, 39_500])
        .await;

    let t0 = Utc::now();
    h.discovery.run_scan("widgets", 50, t0).await.unwrap();

    h.marketplace
        .set_availability("B0WIDGET", "Out of stock.")
        .await;
    let report = h.price_sync.run_cycle(t0).await.unwrap();
    assert_eq!(report.out_of_stock, 1);
    let product = h.repository.find_by_id("B0WIDGET").await.unwrap().unwrap();
    assert_eq!(product.lifecycle_status, LifecycleStatus::OutOfStock);

    h.marketplace.set_availability("B0WIDGET", "In Stock.").await;
    h.price_sync.run_cycle(t0 + Duration::hours(1)).await.unwrap();
    let product = h.repository.find_by_id("B0WIDGET").await.unwrap().unwrap();
    assert_eq!(product.lifecycle_status, LifecycleStatus::Active);

    // Drive the product into auto-pause, then take it out of stock and back:
    // pause outranks stock state.
    h.marketplace.set_price("B0WIDGET", dec!(20)).await;
    let t1 = t0 + Duration::hours(2);
    h.price_sync.run_cycle(t1).await.unwrap();
    h.price_sync
        .run_cycle(t1 + Duration::hours(25))
        .await
        .unwrap();
    let product = h.repository.find_by_id("B0WIDGET").await.unwrap().unwrap();
    assert_eq!(product.lifecycle_status, LifecycleStatus::Paused);

    h.marketplace
        .set_availability("B0WIDGET", "Out of stock.")
        .await;
    h.price_sync
        .run_cycle(t1 + Duration::hours(26))
        .await
        .unwrap();
    h.marketplace.set_availability("B0WIDGET", "In Stock.").await;
    h.price_sync
        .run_cycle(t1 + Duration::hours(27))
        .await
        .unwrap();
    let product = h.repository.find_by_id("B0WIDGET").await.unwrap().unwrap();
    assert_eq!(product.lifecycle_status, LifecycleStatus::Paused);
}

#[tokio::test]
async fn bad_source_price_skips_one_entry_not_the_cycle() {
    let h = harness(42);
    // B0OTHER sorts before B0WIDGET, so the bad entry is hit first.
    h.marketplace
        .add_listing(widget(), vec![40_000, 41_000, 39_500])
        .await;
    h.marketplace
        .add_listing(
            ListingCandidate {
                item_id: "B0OTHER".to_string(),
                title: "Other Widget".to_string(),
                ..widget()
            },
            vec![40_000, 41_000, 39_500],
        )
        .await;

    let t0 = Utc::now();
    h.discovery.run_scan("widgets", 50, t0).await.unwrap();

    h.marketplace.set_price("B0OTHER", dec!(-1)).await;
    h.marketplace.set_price("B0WIDGET", dec!(20)).await;

    let report = h.price_sync.run_cycle(t0).await.unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.evaluated, 1);

    // The later, degraded product still got its warning and stamp.
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].product_id, "B0WIDGET");
    assert_eq!(report.alerts[0].severity, AlertSeverity::Warning);
    let product = h.repository.find_by_id("B0WIDGET").await.unwrap().unwrap();
    assert_eq!(product.margin_below_threshold_since, Some(t0));

    // The skipped record was left untouched.
    let skipped = h.repository.find_by_id("B0OTHER").await.unwrap().unwrap();
    assert_eq!(skipped.cost_price, dec!(15));
    assert!(!skipped.is_degraded());
}

#[tokio::test]
async fn zero_rank_history_is_rejected_not_a_gate_failure() {
    let h = harness(42);
    h.marketplace
        .add_listing(
            ListingCandidate {
                item_id: "B0ZERO".to_string(),
                ..widget()
            },
            vec![0, 0],
        )
        .await;

    let report = h.discovery.run_scan("widgets", 50, Utc::now()).await.unwrap();
    assert_eq!(report.rejected, 1);
    assert_eq!(report.gate_failures, 0);
    assert!(report.imported.is_empty());
}

#[tokio::test]
async fn delisted_source_item_is_skipped_not_failed() {
    let h = harness(42);
    h.marketplace
        .add_listing(widget(), vec![40_000, 41_000, 39_500])
        .await;
    let t0 = Utc::now();
    h.discovery.run_scan("widgets", 50, t0).await.unwrap();

    // Fresh marketplace with no listings behind the same repository.
    let empty_market = Arc::new(MockMarketplaceService::new());
    let price_sync = PriceSyncService::new(
        empty_market,
        h.repository.clone(),
        h.listing_sync.clone(),
        MarginMonitor::new(MarginPolicy::default()),
        Arc::new(AmazonAvailability),
    );

    let report = price_sync.run_cycle(t0).await.unwrap();
    assert_eq!(report.evaluated, 0);
    assert!(report.alerts.is_empty());
}
