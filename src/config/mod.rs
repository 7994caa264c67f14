//! Configuration module for client settings and YAML loading
//!
//! This module provides:
//! - Configuration types (`AppConfig`, `ChannelConfig`, `PageConfig`, `HighlightConfig`)
//! - YAML loading functionality (`load_config`)
//! - Logging initialization (`init_logging`)

pub mod logging;
mod loader;
mod types;

// Re-export types
pub use types::{AppConfig, ChannelConfig, HighlightConfig, PageConfig, PageItemConfig};

// Re-export loader functions
pub use loader::{load_config, load_config_from_str};

// Re-export logging init
pub use logging::init_logging;
