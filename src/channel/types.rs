//! Push channel wire types
//!
//! The server sends JSON envelopes of the form
//! `{"event": "update_bid", "data": {...}}`. Identifiers arrive as either
//! JSON strings or numbers; prices as numbers or numeric strings.
//! Correlation against the page is by string equality on the identifier.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

/// Auction identifier, unique among rendered items.
///
/// The wire may carry it as a string or a number; both normalize to the
/// string form used for correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawAuctionId")]
pub struct AuctionId(String);

/// Accepts `"17"` and `17` alike
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAuctionId {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawAuctionId> for AuctionId {
    fn from(raw: RawAuctionId) -> Self {
        match raw {
            RawAuctionId::Number(n) => AuctionId(n.to_string()),
            RawAuctionId::Text(s) => AuctionId(s),
        }
    }
}

impl AuctionId {
    pub fn new(id: impl Into<String>) -> Self {
        AuctionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AuctionId {
    fn from(id: &str) -> Self {
        AuctionId(id.to_string())
    }
}

// =============================================================================
// Prices
// =============================================================================

/// Price as delivered by the server: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    /// Best-effort conversion to a decimal price.
    ///
    /// Returns None for non-numeric text, NaN, and infinities. Sign is not
    /// checked here; the sync client rejects negative prices.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            PriceValue::Number(n) => Decimal::from_f64(*n),
            PriceValue::Text(s) => Decimal::from_str(s.trim()).ok(),
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

/// A bid-update notification for one auction item
#[derive(Debug, Clone, Deserialize)]
pub struct BidUpdate {
    /// Identifier of the auction the bid belongs to
    pub auction_id: AuctionId,
    /// The new current bid
    pub new_price: PriceValue,
    /// Remaining auction time, applied only when the page opts in
    #[serde(default)]
    pub time_left: Option<String>,
}

/// Incoming envelope (event name + payload)
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub(crate) enum ServerMessage {
    /// A bid changed on some auction
    #[serde(rename = "update_bid")]
    UpdateBid(BidUpdate),
}

/// Outgoing envelope. The only message this client ever sends is the
/// one-shot join-room request at connect time.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub(crate) enum ClientMessage {
    #[serde(rename = "join_auction")]
    JoinAuction { auction_id: AuctionId },
}

// =============================================================================
// Tests
// =============================================================================
