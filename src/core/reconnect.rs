//! Connection monitoring and automatic reconnection
//!
//! The transport owns reconnection policy; this task only decides WHEN to
//! trigger it, by periodically asking the channel whether it has gone
//! stale.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tracing::{error, info, warn};

use crate::channel::traits::PushChannel;

/// Configuration for the reconnect monitor
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Staleness check interval (seconds)
    pub check_interval_secs: u64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 30,
        }
    }
}

/// Monitor the channel and reconnect when it goes stale.
///
/// Terminates cleanly on the shutdown signal. Reconnect failures are
/// logged and retried on the next check; nothing here is fatal.
pub async fn reconnect_monitor_task<C>(
    channel: Arc<Mutex<C>>,
    config: ReconnectConfig,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> anyhow::Result<()>
where
    C: PushChannel + 'static,
{
    let check_interval = Duration::from_secs(config.check_interval_secs);
    let channel_name = {
        let channel_lock = channel.lock().await;
        channel_lock.channel_name()
    };

    info!(channel = channel_name, "Reconnect monitor started");

    loop {
        tokio::select! {
            _ = tokio::time::sleep(check_interval) => {
                let is_stale = {
                    let channel_lock = channel.lock().await;
                    channel_lock.is_stale()
                };

                if is_stale {
                    warn!(
                        channel = channel_name,
                        "Stale connection detected, attempting reconnection..."
                    );

                    let reconnect_result = {
                        let mut channel_lock = channel.lock().await;
                        channel_lock.reconnect().await
                    };

                    match reconnect_result {
                        Ok(_) => {
                            info!(channel = channel_name, "Reconnection successful");
                        }
                        Err(e) => {
                            error!(
                                channel = channel_name,
                                error = ?e,
                                "Reconnection failed"
                            );
                        }
                    }
                }
            },
            _ = shutdown_rx.recv() => {
                info!(channel = channel_name, "Reconnect monitor shutting down");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::traits::tests::MockChannel;

    #[tokio::test]
    async fn test_monitor_triggers_reconnect_on_stale() {
        let channel = Arc::new(Mutex::new(MockChannel::new()));
        channel.lock().await.set_stale(true);

        let config = ReconnectConfig {
            check_interval_secs: 1,
        };

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let monitor_handle = tokio::spawn({
            let c = Arc::clone(&channel);
            reconnect_monitor_task(c, config, shutdown_rx)
        });

        // Wait for one check cycle
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(channel.lock().await.reconnect_call_count(), 1);

        let _ = shutdown_tx.send(());
        let _ = monitor_handle.await;
    }

    #[tokio::test]
    async fn test_monitor_no_trigger_when_healthy() {
        let channel = Arc::new(Mutex::new(MockChannel::new()));
        channel.lock().await.connect().await.unwrap();
        channel.lock().await.set_stale(false);

        let config = ReconnectConfig {
            check_interval_secs: 1,
        };

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let monitor_handle = tokio::spawn({
            let c = Arc::clone(&channel);
            reconnect_monitor_task(c, config, shutdown_rx)
        });

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(channel.lock().await.reconnect_call_count(), 0);

        let _ = shutdown_tx.send(());
        let _ = monitor_handle.await;
    }

    #[tokio::test]
    async fn test_monitor_shutdown() {
        let channel = Arc::new(Mutex::new(MockChannel::new()));
        let config = ReconnectConfig::default();

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let monitor_handle = tokio::spawn({
            let c = Arc::clone(&channel);
            reconnect_monitor_task(c, config, shutdown_rx)
        });

        let _ = shutdown_tx.send(());

        let result =
            tokio::time::timeout(Duration::from_secs(2), monitor_handle).await;
        assert!(result.is_ok(), "Monitor task should shutdown gracefully");
    }
}
