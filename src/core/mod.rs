//! Core module - sync client, page model, highlight timer, channels, runtime
//!
//! This module uses **explicit re-exports** instead of glob exports
//! (`pub use module::*`) to provide better API visibility and prevent
//! accidental public API changes.
//!
//! ## Usage
//! Prefer importing from `crate::core`:
//! ```ignore
//! use crate::core::{SyncClient, PageModel, UpdateOutcome};
//! ```

pub mod channels;
pub mod events;
pub mod forms;
pub mod highlight;
pub mod page;
pub mod reconnect;
pub mod runtime;
pub mod session;
pub mod sync;

// Explicit re-exports for sync module
pub use sync::{format_bid_text, SyncClient, SyncStats, UpdateOutcome};

// Explicit re-exports for page module
pub use page::{AuctionItem, ItemStore, PageModel, SharedPage};

// Explicit re-exports for highlight module
pub use highlight::Highlighter;

// Explicit re-exports for channels module
pub use channels::{ChannelBundle, ChannelEvent, DEFAULT_CHANNEL_CAPACITY};

// Explicit re-exports for events module
pub use events::{current_timestamp_ms, log_event, SyncEvent, SyncEventType};

// Explicit re-exports for runtime module
pub use runtime::sync_task;

// Explicit re-exports for reconnect module
pub use reconnect::{reconnect_monitor_task, ReconnectConfig};

// Explicit re-exports for forms module
pub use forms::{validate_submit, FormField, FormKind, InlineValidator, SubmitDecision};

// Explicit re-exports for session module
pub use session::{logout, welcome_banner, SessionStore};
