//! Realtime auction bid-sync client
//!
//! Companion client for a web auction system:
//! - Push channel transport (WebSocket) delivering bid updates
//! - Sync client reconciling updates against the rendered listing
//! - Transient highlight state with timed removal
//! - Peripheral page logic: form validation, session banner

pub mod channel;
pub mod config;
pub mod core;
pub mod error;

pub use error::AppError;
