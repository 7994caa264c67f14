//! Inter-task channel bundle
//!
//! Transport-to-core event delivery plus the shutdown broadcast.

use tokio::sync::{broadcast, mpsc};

use crate::channel::types::BidUpdate;

/// Default channel capacity for bounded channels
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Decoded event delivered by the push channel, in arrival order
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// Connection to the event source established
    Connected,
    /// Connection lost or closed; displayed state stays as-is
    Disconnected,
    /// A bid changed on some auction
    Bid(BidUpdate),
}

/// Bundle of all inter-task communication channels
#[derive(Debug)]
pub struct ChannelBundle {
    /// Transport -> sync runtime: decoded channel events
    pub event_tx: mpsc::Sender<ChannelEvent>,
    pub event_rx: mpsc::Receiver<ChannelEvent>,

    /// Shutdown broadcast: main -> all tasks
    pub shutdown_tx: broadcast::Sender<()>,
}

impl ChannelBundle {
    pub fn new(capacity: usize) -> Self {
        let (event_tx, event_rx) = mpsc::channel(capacity);
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            event_tx,
            event_rx,
            shutdown_tx,
        }
    }

    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }
}

impl Default for ChannelBundle {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::types::{AuctionId, PriceValue};

    #[test]
    fn test_channel_bundle_creation() {
        let bundle = ChannelBundle::new(50);
        assert!(!bundle.event_tx.is_closed());
    }

    #[tokio::test]
    async fn test_shutdown_signal() {
        let bundle = ChannelBundle::default();
        let mut rx = bundle.subscribe_shutdown();

        assert!(bundle.shutdown_tx.send(()).is_ok());
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_events_delivered_in_order() {
        let mut bundle = ChannelBundle::default();

        bundle.event_tx.send(ChannelEvent::Connected).await.unwrap();
        bundle
            .event_tx
            .send(ChannelEvent::Bid(BidUpdate {
                auction_id: AuctionId::new("17"),
                new_price: PriceValue::Number(55.5),
                time_left: None,
            }))
            .await
            .unwrap();

        assert!(matches!(
            bundle.event_rx.recv().await,
            Some(ChannelEvent::Connected)
        ));
        assert!(matches!(
            bundle.event_rx.recv().await,
            Some(ChannelEvent::Bid(_))
        ));
    }
}
