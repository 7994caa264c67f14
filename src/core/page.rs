//! Rendered page model
//!
//! The server renders the auction listing; this client only reads and
//! mutates it. `ItemStore` is the small repository interface the sync core
//! works against (find an item, set its bid text, toggle its highlight),
//! and `PageModel` is the in-memory document model implementing it. Items
//! are never created or destroyed here.
//!
//! All lookup misses are soft: mutators return false, never an error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::channel::types::AuctionId;
use crate::config::PageConfig;
use crate::core::sync::format_bid_text;

/// Shared handle to the page model for cross-task access
pub type SharedPage<S> = Arc<RwLock<S>>;

/// One auction listing as rendered on the page
#[derive(Debug, Clone)]
pub struct AuctionItem {
    /// Identifier attribute, authoritative for correlation
    pub auction_id: AuctionId,
    /// Listing title
    pub title: String,
    /// Current-bid display region
    pub bid_text: Option<String>,
    /// Time-left display region
    pub time_left: Option<String>,
    /// Whether the "updated" marker is currently applied
    pub highlighted: bool,
    /// When this item last received an update
    pub updated_at: Option<DateTime<Utc>>,
}

impl AuctionItem {
    pub fn new(auction_id: AuctionId, title: impl Into<String>) -> Self {
        Self {
            auction_id,
            title: title.into(),
            bid_text: None,
            time_left: None,
            highlighted: false,
            updated_at: None,
        }
    }
}

/// Repository interface over the rendered page
pub trait ItemStore: Send + Sync {
    /// Find the unique item with the given identifier
    fn find_item(&self, id: &AuctionId) -> Option<&AuctionItem>;

    /// Replace the current-bid text; false if no item matches
    fn set_bid_text(&mut self, id: &AuctionId, text: &str) -> bool;

    /// Replace the time-left text; false if no item matches
    fn set_time_left(&mut self, id: &AuctionId, text: &str) -> bool;

    /// Apply or remove the "updated" marker; false if no item matches
    fn set_highlight(&mut self, id: &AuctionId, on: bool) -> bool;
}

/// In-memory page model seeded from the rendered listing snapshot
#[derive(Debug, Default)]
pub struct PageModel {
    items: HashMap<AuctionId, AuctionItem>,
}

impl PageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the model from the configured page snapshot. Initial bid text
    /// is rendered with the same formatting the sync client uses.
    pub fn from_config(config: &PageConfig) -> Self {
        let mut model = Self::new();

        for item_cfg in &config.items {
            let id = AuctionId::new(item_cfg.auction_id.clone());
            let mut item = AuctionItem::new(id, item_cfg.title.clone());
            item.bid_text = item_cfg
                .current_bid
                .and_then(rust_decimal::Decimal::from_f64_retain)
                .map(format_bid_text);
            item.time_left = item_cfg.time_left.clone();
            model.insert(item);
        }

        model
    }

    pub fn insert(&mut self, item: AuctionItem) {
        self.items.insert(item.auction_id.clone(), item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_shared(self) -> SharedPage<PageModel> {
        Arc::new(RwLock::new(self))
    }
}

impl ItemStore for PageModel {
    fn find_item(&self, id: &AuctionId) -> Option<&AuctionItem> {
        self.items.get(id)
    }

    fn set_bid_text(&mut self, id: &AuctionId, text: &str) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.bid_text = Some(text.to_string());
                item.updated_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    fn set_time_left(&mut self, id: &AuctionId, text: &str) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.time_left = Some(text.to_string());
                true
            }
            None => false,
        }
    }

    fn set_highlight(&mut self, id: &AuctionId, on: bool) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.highlighted = on;
                true
            }
            None => false,
        }
    }
}
