//! Sync event logging
//!
//! Structured diagnostic events for the realtime update path. Every
//! connectivity transition and every applied or dropped update is recorded
//! with a consistent schema so a session can be reconstructed from logs.
//!
//! # Event Types
//!
//! - **Connected** / **Disconnected**: channel lifecycle (diagnostic only)
//! - **BidApplied**: update correlated and written to the page
//! - **CorrelationMiss**: update referenced an auction not on this page
//! - **PriceRejected**: payload price failed the numeric parse
//! - **ClientStarted** / **ClientShutdown**: runtime lifecycle

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

/// Sync event types for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEventType {
    // Connectivity
    Connected,
    Disconnected,

    // Update path
    BidApplied,
    CorrelationMiss,
    PriceRejected,

    // Runtime lifecycle
    ClientStarted,
    ClientShutdown,
}

impl fmt::Display for SyncEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEventType::Connected => write!(f, "CONNECTED"),
            SyncEventType::Disconnected => write!(f, "DISCONNECTED"),
            SyncEventType::BidApplied => write!(f, "BID_APPLIED"),
            SyncEventType::CorrelationMiss => write!(f, "CORRELATION_MISS"),
            SyncEventType::PriceRejected => write!(f, "PRICE_REJECTED"),
            SyncEventType::ClientStarted => write!(f, "CLIENT_STARTED"),
            SyncEventType::ClientShutdown => write!(f, "CLIENT_SHUTDOWN"),
        }
    }
}

/// Sync event with context fields for structured logging
#[derive(Debug, Clone)]
pub struct SyncEvent {
    pub event_type: SyncEventType,
    pub timestamp_ms: u64,
    /// Auction the event refers to, when there is one
    pub auction_id: Option<String>,
    /// Rendered bid text for applied updates
    pub bid_text: Option<String>,
    /// Free-form detail (raw rejected price, close reason, ...)
    pub detail: Option<String>,
}

impl SyncEvent {
    /// Create a new event with the current timestamp
    pub fn new(event_type: SyncEventType) -> Self {
        Self {
            event_type,
            timestamp_ms: current_timestamp_ms(),
            auction_id: None,
            bid_text: None,
            detail: None,
        }
    }

    pub fn connected() -> Self {
        Self::new(SyncEventType::Connected)
    }

    pub fn disconnected() -> Self {
        Self::new(SyncEventType::Disconnected)
    }

    pub fn bid_applied(auction_id: &str, bid_text: &str) -> Self {
        Self {
            auction_id: Some(auction_id.to_string()),
            bid_text: Some(bid_text.to_string()),
            ..Self::new(SyncEventType::BidApplied)
        }
    }

    pub fn correlation_miss(auction_id: &str) -> Self {
        Self {
            auction_id: Some(auction_id.to_string()),
            ..Self::new(SyncEventType::CorrelationMiss)
        }
    }

    pub fn price_rejected(auction_id: &str, raw_price: &str) -> Self {
        Self {
            auction_id: Some(auction_id.to_string()),
            detail: Some(raw_price.to_string()),
            ..Self::new(SyncEventType::PriceRejected)
        }
    }

    pub fn client_started() -> Self {
        Self::new(SyncEventType::ClientStarted)
    }

    pub fn client_shutdown() -> Self {
        Self::new(SyncEventType::ClientShutdown)
    }
}

/// Get current timestamp in milliseconds since Unix epoch
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Log a sync event using structured tracing fields
///
/// Correlation misses and price rejects are warnings; everything else is
/// informational. Nothing here is ever fatal.
pub fn log_event(event: &SyncEvent) {
    let event_type = event.event_type.to_string();
    let timestamp = event.timestamp_ms;

    match event.event_type {
        SyncEventType::CorrelationMiss | SyncEventType::PriceRejected => {
            warn!(
                event_type = %event_type,
                timestamp = timestamp,
                auction_id = ?event.auction_id,
                detail = ?event.detail,
                ""
            );
        }
        _ => {
            info!(
                event_type = %event_type,
                timestamp = timestamp,
                auction_id = ?event.auction_id,
                bid_text = ?event.bid_text,
                detail = ?event.detail,
                ""
            );
        }
    }
}
