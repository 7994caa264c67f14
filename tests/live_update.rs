//! End-to-End Live Update Tests
//!
//! This module tests the complete realtime update cycle:
//! 1. Config loading and page model construction
//! 2. Channel events flowing through the sync runtime
//! 3. Bid text formatting and correlation against rendered items
//! 4. Highlight application and timed removal
//! 5. Graceful shutdown
//!
//! # Running the tests
//! ```bash
//! cargo test --test live_update
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use bidsync::channel::types::{AuctionId, BidUpdate, PriceValue};
use bidsync::config::{load_config_from_str, HighlightConfig};
use bidsync::core::{
    sync_task, ChannelBundle, ChannelEvent, ItemStore, PageModel, SharedPage, SyncClient,
};

// =============================================================================
// Helpers
// =============================================================================

const PAGE_CONFIG_YAML: &str = r#"
channel:
  ws_url: wss://auctions.example.com/socket
page:
  items:
    - auction_id: "17"
      title: Antique clock
      current_bid: 40.0
    - auction_id: "23"
      title: Oil painting
      current_bid: 125.5
highlight:
  duration_ms: 80
"#;

fn bid_event(id: &str, price: PriceValue) -> ChannelEvent {
    ChannelEvent::Bid(BidUpdate {
        auction_id: AuctionId::new(id),
        new_price: price,
        time_left: None,
    })
}

async fn bid_text(page: &SharedPage<PageModel>, id: &str) -> Option<String> {
    page.read()
        .await
        .find_item(&AuctionId::new(id))
        .and_then(|item| item.bid_text.clone())
}

async fn highlighted(page: &SharedPage<PageModel>, id: &str) -> bool {
    page.read()
        .await
        .find_item(&AuctionId::new(id))
        .map(|item| item.highlighted)
        .unwrap_or(false)
}

/// Build a running sync pipeline from the YAML page snapshot
fn spawn_pipeline(
    highlight_ms: u64,
) -> (
    SharedPage<PageModel>,
    tokio::sync::mpsc::Sender<ChannelEvent>,
    tokio::sync::broadcast::Sender<()>,
    Arc<bidsync::core::SyncStats>,
    tokio::task::JoinHandle<anyhow::Result<()>>,
) {
    let config = load_config_from_str(PAGE_CONFIG_YAML).unwrap();
    let page = PageModel::from_config(&config.page).into_shared();

    let bundle = ChannelBundle::default();
    let highlight = HighlightConfig {
        duration_ms: highlight_ms,
    };
    let client = SyncClient::new(Arc::clone(&page), &highlight, false);
    let stats = client.stats();

    let handle = tokio::spawn(sync_task(
        client,
        bundle.event_rx,
        bundle.shutdown_tx.subscribe(),
    ));

    (page, bundle.event_tx, bundle.shutdown_tx, stats, handle)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_matching_update_rewrites_bid_text() {
    let (page, event_tx, shutdown_tx, stats, handle) = spawn_pipeline(80);

    event_tx.send(ChannelEvent::Connected).await.unwrap();
    // Whole number renders with two decimal places
    event_tx
        .send(bid_event("17", PriceValue::Number(12.0)))
        .await
        .unwrap();
    // Excess precision rounds under standard rounding
    event_tx
        .send(bid_event("23", PriceValue::Number(12.345)))
        .await
        .unwrap();

    sleep(Duration::from_millis(50)).await;

    assert_eq!(
        bid_text(&page, "17").await.as_deref(),
        Some("Current Bid: $12.00")
    );
    assert_eq!(
        bid_text(&page, "23").await.as_deref(),
        Some("Current Bid: $12.35")
    );
    assert_eq!(stats.updates_applied(), 2);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_unmatched_update_drops_without_mutation() {
    let (page, event_tx, shutdown_tx, stats, handle) = spawn_pipeline(80);

    // The broadcast covers auctions this page does not render
    event_tx
        .send(bid_event("99", PriceValue::Number(10.0)))
        .await
        .unwrap();

    sleep(Duration::from_millis(50)).await;

    // Exactly one miss recorded, no rendered item touched
    assert_eq!(stats.correlation_misses(), 1);
    assert_eq!(stats.updates_applied(), 0);
    assert_eq!(
        bid_text(&page, "17").await.as_deref(),
        Some("Current Bid: $40.00")
    );
    assert_eq!(
        bid_text(&page, "23").await.as_deref(),
        Some("Current Bid: $125.50")
    );
    assert!(!highlighted(&page, "17").await);
    assert!(!highlighted(&page, "23").await);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_duplicate_delivery_converges() {
    let (page, event_tx, shutdown_tx, stats, handle) = spawn_pipeline(200);

    let update = bid_event("17", PriceValue::Number(55.5));
    event_tx.send(update.clone()).await.unwrap();
    sleep(Duration::from_millis(30)).await;
    assert!(highlighted(&page, "17").await);

    // Same event again: same final text, highlight re-triggered
    event_tx.send(update).await.unwrap();
    sleep(Duration::from_millis(30)).await;

    assert_eq!(
        bid_text(&page, "17").await.as_deref(),
        Some("Current Bid: $55.50")
    );
    assert!(highlighted(&page, "17").await);
    assert_eq!(stats.updates_applied(), 2);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_highlight_removed_after_fixed_delay() {
    let (page, event_tx, shutdown_tx, _stats, handle) = spawn_pipeline(100);

    event_tx
        .send(bid_event("17", PriceValue::Number(55.5)))
        .await
        .unwrap();

    // Applied immediately and kept while the delay runs
    sleep(Duration::from_millis(40)).await;
    assert!(highlighted(&page, "17").await);

    // Gone once the delay has elapsed
    sleep(Duration::from_millis(120)).await;
    assert!(!highlighted(&page, "17").await);

    // The price update itself is not transient
    assert_eq!(
        bid_text(&page, "17").await.as_deref(),
        Some("Current Bid: $55.50")
    );

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_disconnect_keeps_last_known_prices() {
    let (page, event_tx, shutdown_tx, _stats, handle) = spawn_pipeline(80);

    event_tx.send(ChannelEvent::Connected).await.unwrap();
    event_tx
        .send(bid_event("17", PriceValue::Number(60.0)))
        .await
        .unwrap();
    event_tx.send(ChannelEvent::Disconnected).await.unwrap();

    sleep(Duration::from_millis(50)).await;

    // Stale-but-visible: the page still shows the last applied price
    assert_eq!(
        bid_text(&page, "17").await.as_deref(),
        Some("Current Bid: $60.00")
    );

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_malformed_price_leaves_rendered_state() {
    let (page, event_tx, shutdown_tx, stats, handle) = spawn_pipeline(80);

    event_tx
        .send(bid_event("17", PriceValue::Text("free".to_string())))
        .await
        .unwrap();

    sleep(Duration::from_millis(50)).await;

    assert_eq!(stats.price_rejects(), 1);
    assert_eq!(
        bid_text(&page, "17").await.as_deref(),
        Some("Current Bid: $40.00")
    );
    assert!(!highlighted(&page, "17").await);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
