//! WebSocket push channel implementation
//!
//! tokio-tungstenite client for the auction event source. A background
//! reader task decodes incoming envelopes and forwards them into the core
//! as `ChannelEvent`s. Reconnection with exponential backoff and jitter is
//! handled here; the core never sees transport details.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream};

use crate::channel::errors::{ChannelError, ChannelResult};
use crate::channel::traits::PushChannel;
use crate::channel::types::{AuctionId, ClientMessage, ServerMessage};
use crate::config::ChannelConfig;
use crate::core::channels::ChannelEvent;

// =============================================================================
// Helpers
// =============================================================================

fn current_time_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Connect to a WebSocket endpoint with TLS (TLSv1.2 minimum)
async fn connect_tls(url: &str) -> ChannelResult<WsStream> {
    let tls = native_tls::TlsConnector::builder()
        .min_protocol_version(Some(native_tls::Protocol::Tlsv12))
        .build()
        .map_err(|e| ChannelError::ConnectionFailed(format!("TLS error: {}", e)))?;

    let (ws_stream, _response) =
        connect_async_tls_with_config(url, None, false, Some(Connector::NativeTls(tls)))
            .await
            .map_err(|e| ChannelError::WebSocket(Box::new(e)))?;

    Ok(ws_stream)
}

// =============================================================================
// WebSocket Type Aliases
// =============================================================================

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;
type WsWriter = SplitSink<WsStream, Message>;
type WsReader = SplitStream<WsStream>;

// =============================================================================
// Connection health
// =============================================================================

/// Shared health markers updated by the reader task
#[derive(Debug, Default)]
struct ConnectionHealth {
    reader_alive: Arc<AtomicBool>,
    last_event: Arc<AtomicU64>,
}

// =============================================================================
// WsChannel
// =============================================================================

/// WebSocket transport implementing the PushChannel trait
pub struct WsChannel {
    config: ChannelConfig,
    event_tx: mpsc::Sender<ChannelEvent>,
    ws_sender: Option<Arc<Mutex<WsWriter>>>,
    reader_handle: Option<JoinHandle<()>>,
    connected: bool,
    health: ConnectionHealth,
}

impl WsChannel {
    /// Create a new channel delivering events into `event_tx`
    pub fn new(config: ChannelConfig, event_tx: mpsc::Sender<ChannelEvent>) -> Self {
        Self {
            config,
            event_tx,
            ws_sender: None,
            reader_handle: None,
            connected: false,
            health: ConnectionHealth::default(),
        }
    }

    fn split_and_spawn_reader(&mut self, ws_stream: WsStream) {
        let (ws_sender, ws_receiver) = ws_stream.split();
        self.ws_sender = Some(Arc::new(Mutex::new(ws_sender)));

        let event_tx = self.event_tx.clone();
        let reader_alive = Arc::clone(&self.health.reader_alive);
        let last_event = Arc::clone(&self.health.last_event);
        last_event.store(current_time_ms(), Ordering::Relaxed);

        let handle = tokio::spawn(async move {
            Self::message_reader_loop(ws_receiver, event_tx, reader_alive, last_event).await;
        });

        self.reader_handle = Some(handle);
    }

    async fn send_text(&self, text: String) -> ChannelResult<()> {
        let ws_sender = self.ws_sender.as_ref().ok_or(ChannelError::NotConnected)?;

        let mut sender = ws_sender.lock().await;
        sender
            .send(Message::Text(text))
            .await
            .map_err(|e| ChannelError::WebSocket(Box::new(e)))
    }

    // =========================================================================
    // Background Reader Loop
    // =========================================================================

    async fn message_reader_loop(
        mut ws_receiver: WsReader,
        event_tx: mpsc::Sender<ChannelEvent>,
        reader_alive: Arc<AtomicBool>,
        last_event: Arc<AtomicU64>,
    ) {
        tracing::debug!("WebSocket message reader loop started");
        reader_alive.store(true, Ordering::Relaxed);

        while let Some(msg_result) = ws_receiver.next().await {
            match msg_result {
                Ok(Message::Text(text)) => {
                    last_event.store(current_time_ms(), Ordering::Relaxed);
                    Self::dispatch_text(&text, &event_tx).await;
                }
                Ok(Message::Binary(data)) => {
                    last_event.store(current_time_ms(), Ordering::Relaxed);
                    if let Ok(text) = String::from_utf8(data) {
                        Self::dispatch_text(&text, &event_tx).await;
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("WebSocket closed by server");
                    break;
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => {}
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            }
        }

        reader_alive.store(false, Ordering::Relaxed);
        // Best effort: the runtime may already be shutting down
        let _ = event_tx.send(ChannelEvent::Disconnected).await;
        tracing::warn!("WebSocket message reader loop ended");
    }

    async fn dispatch_text(text: &str, event_tx: &mpsc::Sender<ChannelEvent>) {
        match serde_json::from_str::<ServerMessage>(text) {
            Ok(ServerMessage::UpdateBid(update)) => {
                tracing::debug!(
                    auction_id = %update.auction_id,
                    "Received bid update"
                );
                if event_tx.send(ChannelEvent::Bid(update)).await.is_err() {
                    tracing::warn!("Event receiver dropped; discarding bid update");
                }
            }
            Err(_) => {
                // Unknown events are expected; the server broadcasts more
                // than this client consumes
                tracing::trace!(message = %text, "Ignoring unknown channel message");
            }
        }
    }
}

// =============================================================================
// PushChannel Implementation
// =============================================================================

#[async_trait]
impl PushChannel for WsChannel {
    async fn connect(&mut self) -> ChannelResult<()> {
        let url = self.config.ws_url.clone();
        tracing::info!("Connecting to auction event source: {}", url);

        let ws_stream = connect_tls(&url).await?;
        self.split_and_spawn_reader(ws_stream);
        self.connected = true;

        let _ = self.event_tx.send(ChannelEvent::Connected).await;

        // One-shot join-room request, gated on the page supplying an id
        if let Some(room) = self.config.auction_room.clone() {
            self.join_auction(&AuctionId::new(room)).await?;
        }

        tracing::info!(channel = "websocket", "Connected to auction event source");
        Ok(())
    }

    async fn disconnect(&mut self) -> ChannelResult<()> {
        if let Some(handle) = self.reader_handle.take() {
            handle.abort();
        }
        if let Some(ws_sender) = self.ws_sender.take() {
            let mut sender = ws_sender.lock().await;
            let _ = sender.close().await;
        }

        self.connected = false;
        self.health.reader_alive.store(false, Ordering::Relaxed);
        self.health.last_event.store(0, Ordering::Relaxed);

        tracing::info!("Disconnected from auction event source");
        Ok(())
    }

    async fn join_auction(&mut self, auction_id: &AuctionId) -> ChannelResult<()> {
        let msg = ClientMessage::JoinAuction {
            auction_id: auction_id.clone(),
        };
        let text = serde_json::to_string(&msg).map_err(|e| ChannelError::JoinFailed {
            auction_id: auction_id.to_string(),
            reason: e.to_string(),
        })?;

        self.send_text(text).await?;

        tracing::info!(auction_id = %auction_id, "Joined auction update stream");
        Ok(())
    }

    async fn reconnect(&mut self) -> ChannelResult<()> {
        tracing::info!("WebSocket: Initiating reconnection...");
        self.disconnect().await?;

        const MAX_RECONNECT_ATTEMPTS: u32 = 3;
        let mut last_error: Option<ChannelError> = None;

        for attempt in 0..MAX_RECONNECT_ATTEMPTS {
            // Jitter (0-199ms) avoids thundering herd when many clients
            // reconnect at once
            let jitter = rand::random::<u64>() % 200;
            let backoff_ms = std::cmp::min(500 * (1u64 << attempt), 5000) + jitter;

            tracing::info!(
                "WebSocket: Reconnect attempt {} of {}, waiting {}ms...",
                attempt + 1,
                MAX_RECONNECT_ATTEMPTS,
                backoff_ms
            );

            tokio::time::sleep(Duration::from_millis(backoff_ms)).await;

            match self.connect().await {
                Ok(()) => {
                    tracing::info!("WebSocket: Reconnection complete");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("WebSocket: Reconnect attempt {} failed: {}", attempt + 1, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ChannelError::ConnectionFailed("Reconnection failed after max attempts".into())
        }))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_stale(&self) -> bool {
        if !self.connected {
            return true;
        }
        if !self.health.reader_alive.load(Ordering::Relaxed) {
            return true;
        }
        let last_event = self.health.last_event.load(Ordering::Relaxed);
        if last_event == 0 {
            return false;
        }
        let age_ms = current_time_ms().saturating_sub(last_event);
        age_ms > self.config.stale_after_secs * 1000
    }

    fn channel_name(&self) -> &'static str {
        "websocket"
    }
}

// =============================================================================
// Tests
// =============================================================================
