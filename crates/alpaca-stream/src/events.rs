//! Disconnect reasons and error categories reported by the stream

use std::fmt;

/// Reason for disconnection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// Server completed a close handshake
    ServerClosed {
        /// WebSocket close code
        code: u16,
        /// Close reason sent by the server
        reason: String,
    },
    /// Connection dropped without a close handshake
    ConnectionLost,
    /// Network error while sending or receiving
    NetworkError(String),
    /// Client requested shutdown
    Shutdown,
}

impl DisconnectReason {
    /// Returns true for an orderly close from either side
    pub fn is_clean(&self) -> bool {
        match self {
            Self::ServerClosed { code, .. } => *code == 1000,
            Self::Shutdown => true,
            Self::ConnectionLost | Self::NetworkError(_) => false,
        }
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServerClosed { code, reason } if reason.is_empty() => {
                write!(f, "server closed the connection ({})", code)
            }
            Self::ServerClosed { code, reason } => {
                write!(f, "server closed the connection ({}: {})", code, reason)
            }
            Self::ConnectionLost => f.write_str("connection lost"),
            Self::NetworkError(e) => write!(f, "network error: {}", e),
            Self::Shutdown => f.write_str("shutdown requested"),
        }
    }
}

/// Category of a non-fatal error observed while streaming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A frame could not be decoded and was discarded
    Decode,
    /// A handshake reply arrived in the wrong state
    ProtocolAnomaly,
    /// The server rejected the credentials
    AuthorizationRejected,
    /// The transport reported an error
    Transport,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Decode => "decode",
            Self::ProtocolAnomaly => "protocol anomaly",
            Self::AuthorizationRejected => "authorization rejected",
            Self::Transport => "transport",
        };
        f.write_str(name)
    }
}
