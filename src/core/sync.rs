//! Realtime sync client
//!
//! Applies incoming bid updates to the rendered page without a reload:
//! correlate by auction id, rewrite the current-bid text, trigger the
//! highlight timer. Connectivity transitions are diagnostic only; the
//! page keeps showing last-known prices while disconnected.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::channel::types::{BidUpdate, PriceValue};
use crate::config::HighlightConfig;
use crate::core::events::{log_event, SyncEvent};
use crate::core::highlight::Highlighter;
use crate::core::page::{ItemStore, SharedPage};

/// Format a price for the current-bid region: two decimal places, standard
/// half-away-from-zero rounding (12 -> $12.00, 12.345 -> $12.35)
pub fn format_bid_text(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("Current Bid: ${:.2}", rounded)
}

/// Counters for the realtime update path, shared with tests and monitoring
#[derive(Debug, Default)]
pub struct SyncStats {
    updates_applied: AtomicU64,
    correlation_misses: AtomicU64,
    price_rejects: AtomicU64,
}

impl SyncStats {
    pub fn updates_applied(&self) -> u64 {
        self.updates_applied.load(Ordering::SeqCst)
    }

    pub fn correlation_misses(&self) -> u64 {
        self.correlation_misses.load(Ordering::SeqCst)
    }

    pub fn price_rejects(&self) -> u64 {
        self.price_rejects.load(Ordering::SeqCst)
    }
}

/// What happened to one bid update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Update correlated and written to the page
    Applied { bid_text: String },
    /// No rendered item carries this auction id; nothing was mutated.
    /// Expected whenever the page shows a subset of the broadcast.
    NotFound,
    /// Price failed the best-effort numeric parse (or was negative);
    /// dropped with a diagnostic instead of rendering a non-numeric value
    InvalidPrice,
}

/// Realtime sync client over a rendered page
pub struct SyncClient<S> {
    page: SharedPage<S>,
    highlighter: Highlighter<S>,
    apply_time_left: bool,
    stats: Arc<SyncStats>,
}

impl<S: ItemStore + 'static> SyncClient<S> {
    pub fn new(page: SharedPage<S>, highlight: &HighlightConfig, apply_time_left: bool) -> Self {
        let highlighter = Highlighter::new(
            Arc::clone(&page),
            Duration::from_millis(highlight.duration_ms),
        );

        Self {
            page,
            highlighter,
            apply_time_left,
            stats: Arc::new(SyncStats::default()),
        }
    }

    /// Shared counter handle, cheap to clone out before the client moves
    /// into its runtime task
    pub fn stats(&self) -> Arc<SyncStats> {
        Arc::clone(&self.stats)
    }

    /// Channel established. Diagnostic only; no page mutation.
    pub async fn on_connect(&self) {
        log_event(&SyncEvent::connected());
    }

    /// Channel lost. Diagnostic only: last-known prices stay visible,
    /// stale-but-visible is the accepted degraded mode.
    pub async fn on_disconnect(&self) {
        log_event(&SyncEvent::disconnected());
    }

    /// Apply one bid update to the page.
    ///
    /// Idempotent: re-applying the same event converges to the same bid
    /// text and re-triggers the highlight.
    pub async fn on_bid_update(&self, update: &BidUpdate) -> UpdateOutcome {
        let id = &update.auction_id;

        let price = match update.new_price.as_decimal() {
            Some(p) if p >= Decimal::ZERO => p,
            _ => {
                self.stats.price_rejects.fetch_add(1, Ordering::SeqCst);
                log_event(&SyncEvent::price_rejected(
                    id.as_str(),
                    &raw_price(&update.new_price),
                ));
                return UpdateOutcome::InvalidPrice;
            }
        };

        let bid_text = format_bid_text(price);

        let found = {
            let mut page = self.page.write().await;
            if page.set_bid_text(id, &bid_text) {
                if self.apply_time_left {
                    if let Some(time_left) = &update.time_left {
                        page.set_time_left(id, time_left);
                    }
                }
                true
            } else {
                false
            }
        };

        if !found {
            self.stats.correlation_misses.fetch_add(1, Ordering::SeqCst);
            log_event(&SyncEvent::correlation_miss(id.as_str()));
            return UpdateOutcome::NotFound;
        }

        self.stats.updates_applied.fetch_add(1, Ordering::SeqCst);
        log_event(&SyncEvent::bid_applied(id.as_str(), &bid_text));
        self.highlighter.highlight(id).await;

        UpdateOutcome::Applied { bid_text }
    }
}

fn raw_price(price: &PriceValue) -> String {
    match price {
        PriceValue::Number(n) => n.to_string(),
        PriceValue::Text(s) => s.clone(),
    }
}

// =============================================================================
// Tests
// =============================================================================
