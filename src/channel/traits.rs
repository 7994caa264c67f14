//! Push channel trait definition
//!
//! The PushChannel trait defines the interface the rest of the client uses
//! to manage the event-source connection, independent of the transport.

use async_trait::async_trait;

use crate::channel::errors::ChannelResult;
use crate::channel::types::AuctionId;

/// Common interface for push-event transports
///
/// Implementations deliver decoded events into the core through an mpsc
/// sender handed over at construction time; this trait only covers the
/// connection lifecycle.
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Open the connection to the event source.
    ///
    /// Implementations should:
    /// 1. Establish the underlying stream
    /// 2. Start delivering decoded events
    /// 3. Announce interest in a specific auction when one is configured
    async fn connect(&mut self) -> ChannelResult<()>;

    /// Close the connection and stop delivering events.
    ///
    /// Displayed state is NOT cleared on disconnect; the page keeps showing
    /// the last-known prices.
    async fn disconnect(&mut self) -> ChannelResult<()>;

    /// Send the one-shot join-room request for a specific auction
    async fn join_auction(&mut self, auction_id: &AuctionId) -> ChannelResult<()>;

    /// Tear down and re-establish the connection.
    ///
    /// Reconnection policy (attempts, backoff) is owned by the transport,
    /// never by the sync core.
    async fn reconnect(&mut self) -> ChannelResult<()>;

    /// Whether the connection is currently open
    fn is_connected(&self) -> bool;

    /// Whether the connection looks unhealthy (reader dead, or no event
    /// received within the configured staleness window)
    fn is_stale(&self) -> bool;

    /// Transport name for logging
    fn channel_name(&self) -> &'static str;
}

#[cfg(any(test, doc))]
pub mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Arc;

    /// Mock transport for core tests: tracks lifecycle calls, staleness is
    /// externally controlled.
    #[derive(Debug, Default)]
    pub struct MockChannel {
        pub connected: bool,
        stale: Arc<AtomicBool>,
        connect_calls: Arc<AtomicU32>,
        reconnect_calls: Arc<AtomicU32>,
        joined: Vec<AuctionId>,
    }

    impl MockChannel {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_stale(&self, stale: bool) {
            self.stale.store(stale, Ordering::SeqCst);
        }

        pub fn connect_call_count(&self) -> u32 {
            self.connect_calls.load(Ordering::SeqCst)
        }

        pub fn reconnect_call_count(&self) -> u32 {
            self.reconnect_calls.load(Ordering::SeqCst)
        }

        pub fn joined(&self) -> &[AuctionId] {
            &self.joined
        }
    }

    #[async_trait]
    impl PushChannel for MockChannel {
        async fn connect(&mut self) -> ChannelResult<()> {
            self.connect_calls.fetch_add(1, Ordering::SeqCst);
            self.connected = true;
            Ok(())
        }

        async fn disconnect(&mut self) -> ChannelResult<()> {
            self.connected = false;
            Ok(())
        }

        async fn join_auction(&mut self, auction_id: &AuctionId) -> ChannelResult<()> {
            self.joined.push(auction_id.clone());
            Ok(())
        }

        async fn reconnect(&mut self) -> ChannelResult<()> {
            self.reconnect_calls.fetch_add(1, Ordering::SeqCst);
            self.connected = true;
            self.stale.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected
        }

        fn is_stale(&self) -> bool {
            self.stale.load(Ordering::SeqCst)
        }

        fn channel_name(&self) -> &'static str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_mock_channel_connect() {
        let mut channel = MockChannel::new();
        assert!(!channel.is_connected());

        channel.connect().await.unwrap();
        assert!(channel.is_connected());
        assert_eq!(channel.connect_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_channel_disconnect() {
        let mut channel = MockChannel::new();
        channel.connect().await.unwrap();
        channel.disconnect().await.unwrap();
        assert!(!channel.is_connected());
    }

    #[tokio::test]
    async fn test_mock_channel_join() {
        let mut channel = MockChannel::new();
        channel.connect().await.unwrap();
        channel.join_auction(&AuctionId::new("17")).await.unwrap();

        assert_eq!(channel.joined(), &[AuctionId::new("17")]);
    }

    #[tokio::test]
    async fn test_mock_channel_name() {
        let channel = MockChannel::new();
        assert_eq!(channel.channel_name(), "mock");
    }
}
