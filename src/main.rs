//! Auction bid-sync client entry point
//!
//! This binary:
//! 1. Loads configuration
//! 2. Builds the page model from the rendered listing snapshot
//! 3. Connects to the auction event source over WebSocket
//! 4. Applies incoming bid updates to the page until shutdown

use std::path::Path;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::Mutex;
use tracing::{error, info};

use bidsync::channel::{PushChannel, WsChannel};
use bidsync::config;
use bidsync::core::{
    reconnect_monitor_task, sync_task, ChannelBundle, PageModel, ReconnectConfig, SyncClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenvy::dotenv().ok();

    config::init_logging();

    info!("Auction bid-sync client starting...");

    let config_path =
        std::env::var("BIDSYNC_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let config = match config::load_config(Path::new(&config_path)) {
        Ok(cfg) => {
            info!(
                items = cfg.page.items.len(),
                url = %cfg.channel.ws_url,
                "Configuration loaded"
            );
            cfg
        }
        Err(e) => {
            error!("Configuration failed: {}", e);
            std::process::exit(1);
        }
    };

    let page = PageModel::from_config(&config.page).into_shared();
    let bundle = ChannelBundle::default();

    let client = SyncClient::new(
        Arc::clone(&page),
        &config.highlight,
        config.page.apply_time_left,
    );

    let mut channel = WsChannel::new(config.channel.clone(), bundle.event_tx.clone());
    if let Err(e) = channel.connect().await {
        // Degraded but not fatal: the monitor keeps trying while the page
        // shows its rendered state
        error!("Initial connection failed: {}", e);
    }
    let channel = Arc::new(Mutex::new(channel));

    let sync_handle = tokio::spawn(sync_task(
        client,
        bundle.event_rx,
        bundle.shutdown_tx.subscribe(),
    ));

    let monitor_handle = tokio::spawn(reconnect_monitor_task(
        Arc::clone(&channel),
        ReconnectConfig::default(),
        bundle.shutdown_tx.subscribe(),
    ));

    // Spawn SIGINT handler task
    let shutdown_signal = bundle.shutdown_tx.clone();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Graceful shutdown initiated");
                let _ = shutdown_signal.send(());
            }
            Err(err) => {
                eprintln!("Failed to listen for Ctrl+C signal: {}", err);
            }
        }
    });

    let _ = sync_handle.await?;
    let _ = monitor_handle.await?;

    {
        let mut channel = channel.lock().await;
        if let Err(e) = channel.disconnect().await {
            error!("Disconnect failed: {}", e);
        }
    }

    info!("Clean exit");
    Ok(())
}
