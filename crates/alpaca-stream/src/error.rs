//! Error types for the streaming client

use alpaca_config::ConfigError;
use std::time::Duration;
use thiserror::Error;

use crate::session::ConnectionState;
use crate::transport::TransportError;

/// Errors that end a streaming run
///
/// Per-frame problems (bad JSON, unknown streams, out-of-order replies) are
/// reported through logs and [`Hooks`](crate::hooks::Hooks) instead and never
/// appear here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Credentials or endpoint could not be resolved
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The transport failed to connect or to send
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server did not answer a handshake step in time
    #[error("no reply while {state} after {timeout:?}")]
    HandshakeTimeout {
        /// State the handshake was stuck in
        state: ConnectionState,
        /// Configured limit
        timeout: Duration,
    },
}

impl StreamError {
    /// Returns true if retrying with the same configuration cannot help
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type for streaming operations
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StreamError::HandshakeTimeout {
            state: ConnectionState::AwaitingAuthorization,
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "no reply while awaiting authorization after 30s");
    }

    #[test]
    fn test_is_fatal() {
        assert!(StreamError::Config(ConfigError::EnvVarNotSet("APCA_API_KEY_ID".into())).is_fatal());
        assert!(!StreamError::Transport(TransportError::ConnectionClosed).is_fatal());
    }
}
