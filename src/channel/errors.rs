//! Push channel error types
//!
//! All transport-related errors are wrapped in the ChannelError enum
//! which implements thiserror for consistent error handling.

use thiserror::Error;

/// Transport-specific error types for push channel operations
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Connection to the event source failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Join-room request could not be sent
    #[error("Join failed for auction {auction_id}: {reason}")]
    JoinFailed { auction_id: String, reason: String },

    /// Operation requires an open connection
    #[error("Not connected")]
    NotConnected,

    /// WebSocket protocol error (boxed to reduce enum size)
    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),
}

/// Result type alias for channel operations
pub type ChannelResult<T> = std::result::Result<T, ChannelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_display() {
        let err = ChannelError::ConnectionFailed("timeout".to_string());
        assert_eq!(err.to_string(), "Connection failed: timeout");
    }

    #[test]
    fn test_join_failed_display() {
        let err = ChannelError::JoinFailed {
            auction_id: "17".to_string(),
            reason: "sender closed".to_string(),
        };
        assert_eq!(err.to_string(), "Join failed for auction 17: sender closed");
    }

    #[test]
    fn test_not_connected_display() {
        assert_eq!(ChannelError::NotConnected.to_string(), "Not connected");
    }
}
