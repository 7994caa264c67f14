//! Configuration types for the bid-sync client
//!
//! This module defines all configuration structs that are loaded from YAML
//! at startup. The page section describes the server-rendered listing this
//! client reconciles incoming bid updates against.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Push channel (WebSocket) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// WebSocket URL of the auction event source (ws:// or wss://)
    pub ws_url: String,
    /// Auction id to join at connect time, when the page identifies one.
    /// Absent on listing pages that receive the whole broadcast.
    #[serde(default)]
    pub auction_room: Option<String>,
    /// Staleness threshold: no event received for this long marks the
    /// connection stale and eligible for reconnection
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
}

fn default_stale_after_secs() -> u64 {
    30
}

/// One auction item as rendered by the server on page load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageItemConfig {
    /// Unique identifier, authoritative for correlation
    pub auction_id: String,
    /// Listing title
    pub title: String,
    /// Price shown in the current-bid region at render time
    #[serde(default)]
    pub current_bid: Option<f64>,
    /// Text shown in the time-left region at render time
    #[serde(default)]
    pub time_left: Option<String>,
}

/// The rendered listing snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Items currently rendered on the page
    pub items: Vec<PageItemConfig>,
    /// Whether incoming `time_left` values are applied to items.
    /// Off by default: updates carry the field but the page must opt in.
    #[serde(default)]
    pub apply_time_left: bool,
}

/// Highlight timer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// How long the "updated" marker stays applied, in milliseconds
    pub duration_ms: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self { duration_ms: 1000 }
    }
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Push channel settings
    pub channel: ChannelConfig,
    /// Rendered page snapshot
    pub page: PageConfig,
    /// Highlight timer settings
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl AppConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        // Rule: channel URL must be a websocket endpoint
        let url = self.channel.ws_url.trim();
        if url.is_empty() {
            return Err(AppError::Config(
                "channel.ws_url cannot be empty".to_string(),
            ));
        }
        if !url.starts_with("ws://") && !url.starts_with("wss://") {
            return Err(AppError::Config(format!(
                "channel.ws_url must start with ws:// or wss:// (got '{}')",
                url
            )));
        }

        // Rule: auction ids must be unique; at most one item per id is
        // authoritative for correlation
        let mut seen = HashSet::new();
        for item in &self.page.items {
            if item.auction_id.trim().is_empty() {
                return Err(AppError::Config(
                    "page item auction_id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(item.auction_id.as_str()) {
                return Err(AppError::Config(format!(
                    "duplicate auction_id '{}' in page items",
                    item.auction_id
                )));
            }
        }

        // Rule: highlight duration must be nonzero
        if self.highlight.duration_ms == 0 {
            return Err(AppError::Config(
                "highlight.duration_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> AppConfig {
        AppConfig {
            channel: ChannelConfig {
                ws_url: "wss://auctions.example.com/socket".to_string(),
                auction_room: None,
                stale_after_secs: 30,
            },
            page: PageConfig {
                items: vec![PageItemConfig {
                    auction_id: "17".to_string(),
                    title: "Antique clock".to_string(),
                    current_bid: Some(40.0),
                    time_left: None,
                }],
                apply_time_left: false,
            },
            highlight: HighlightConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(create_valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_ws_url_fails() {
        let mut config = create_valid_config();
        config.channel.ws_url = "  ".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ws_url"));
    }

    #[test]
    fn test_non_websocket_url_fails() {
        let mut config = create_valid_config();
        config.channel.ws_url = "https://auctions.example.com".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must start with ws://"));
    }

    #[test]
    fn test_duplicate_auction_id_fails() {
        let mut config = create_valid_config();
        let dup = config.page.items[0].clone();
        config.page.items.push(dup);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_auction_id_fails() {
        let mut config = create_valid_config();
        config.page.items[0].auction_id = "".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_highlight_duration_fails() {
        let mut config = create_valid_config();
        config.highlight.duration_ms = 0;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duration_ms"));
    }

    #[test]
    fn test_highlight_default_is_one_second() {
        assert_eq!(HighlightConfig::default().duration_ms, 1000);
    }
}
