//! Sync runtime
//!
//! The thin adapter between the push channel and the sync client: a single
//! task drains decoded events in delivery order and dispatches them. No
//! batching, no reordering: each update is applied individually as it
//! arrives.

use tokio::sync::{broadcast, mpsc};
use tracing::info;

use crate::core::channels::ChannelEvent;
use crate::core::events::{log_event, SyncEvent};
use crate::core::page::ItemStore;
use crate::core::sync::SyncClient;

/// Drive the sync client from the event channel until shutdown.
///
/// Terminates when the shutdown broadcast fires or the event channel
/// closes (all senders dropped).
pub async fn sync_task<S>(
    client: SyncClient<S>,
    mut event_rx: mpsc::Receiver<ChannelEvent>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> anyhow::Result<()>
where
    S: ItemStore + 'static,
{
    log_event(&SyncEvent::client_started());

    loop {
        tokio::select! {
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(ChannelEvent::Connected) => client.on_connect().await,
                    Some(ChannelEvent::Disconnected) => client.on_disconnect().await,
                    Some(ChannelEvent::Bid(update)) => {
                        client.on_bid_update(&update).await;
                    }
                    None => {
                        info!("Event channel closed; sync task stopping");
                        break;
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("Shutdown signal received; sync task stopping");
                break;
            }
        }
    }

    log_event(&SyncEvent::client_shutdown());
    Ok(())
}
