//! Push channel transport
//!
//! The auction server pushes bid updates over a persistent WebSocket
//! connection. This module owns the transport side: wire types, the
//! `PushChannel` trait, and the tokio-tungstenite implementation.
//! Reconnection policy lives here, not in the core.

pub mod errors;
pub mod traits;
pub mod types;
pub mod ws;

pub use errors::{ChannelError, ChannelResult};
pub use traits::PushChannel;
pub use types::{AuctionId, BidUpdate, PriceValue};
pub use ws::WsChannel;
