//! Handshake state machine for one streaming connection
//!
//! [`Session`] owns the [`ConnectionState`] and decides what to do with each
//! inbound frame. It performs no I/O: it returns an [`Action`] which the
//! connection carries out, so the state machine can be tested on its own.
//!
//! ```text
//! Connecting --connected--> AwaitingAuthorization --authorization-->
//!     AwaitingSubscriptionAck --listening--> Streaming --closed--> Disconnected
//! ```

use alpaca_types::{
    authentication_message, decode_reply, listen_message, AuthorizationStatus, Channel,
    ChannelSet, DecodeError, Reply, ReplyKind,
};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Lifecycle state of a streaming session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Transport connection in progress
    Connecting,
    /// Authenticate sent, waiting for the authorization reply
    AwaitingAuthorization,
    /// Listen sent, waiting for the listening reply
    AwaitingSubscriptionAck,
    /// Updates are being delivered
    Streaming,
    /// Terminal for this connection attempt
    Disconnected,
}

impl ConnectionState {
    /// Returns true while a handshake reply is outstanding
    pub fn is_handshaking(&self) -> bool {
        matches!(self, Self::AwaitingAuthorization | Self::AwaitingSubscriptionAck)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connecting => "connecting",
            Self::AwaitingAuthorization => "awaiting authorization",
            Self::AwaitingSubscriptionAck => "awaiting subscription ack",
            Self::Streaming => "streaming",
            Self::Disconnected => "disconnected",
        };
        f.write_str(name)
    }
}

/// What the connection should do after a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing
    None,
    /// Write this text to the transport
    Send(String),
    /// Hand this payload to the channel's callback
    Dispatch {
        /// Channel the update arrived on
        channel: Channel,
        /// Raw `data` object text
        payload: String,
    },
}

/// A frame that was discarded. None of these end the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The frame could not be decoded
    #[error("failed to decode frame: {0}")]
    Decode(#[from] DecodeError),

    /// A reply arrived that the current state does not expect
    #[error("unexpected {kind} reply while {state}")]
    Anomaly {
        /// State the session was in
        state: ConnectionState,
        /// Kind of reply received
        kind: ReplyKind,
    },

    /// The server rejected the credentials
    #[error("server rejected the credentials")]
    Unauthorized,
}

/// Protocol state for one connection attempt
#[derive(Debug, Clone)]
pub struct Session {
    state: ConnectionState,
    channels: ChannelSet,
}

impl Session {
    /// Create a session that will subscribe to `channels`
    pub fn new(channels: ChannelSet) -> Self {
        Self {
            state: ConnectionState::Connecting,
            channels,
        }
    }

    /// Current state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Channels this session subscribes to
    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    /// The transport is up: returns the authenticate message to send
    pub fn on_connected(&mut self, key_id: &str, secret_key: &str) -> String {
        self.transition(ConnectionState::AwaitingAuthorization);
        authentication_message(key_id, secret_key)
    }

    /// Decode and handle one text frame
    pub fn on_frame(&mut self, text: &str) -> Result<Action, FrameError> {
        let reply = decode_reply(text)?;
        self.on_reply(reply)
    }

    /// Handle one decoded reply
    pub fn on_reply(&mut self, reply: Reply) -> Result<Action, FrameError> {
        match (self.state, reply) {
            (ConnectionState::AwaitingAuthorization, Reply::Authorization { status }) => {
                if status == AuthorizationStatus::Unauthorized {
                    return Err(FrameError::Unauthorized);
                }
                self.transition(ConnectionState::AwaitingSubscriptionAck);
                Ok(Action::Send(listen_message(&self.channels)))
            }
            (ConnectionState::AwaitingSubscriptionAck, Reply::Listening { streams }) => {
                for channel in &self.channels {
                    if !streams.iter().any(|name| name == channel.as_str()) {
                        warn!(%channel, "Server did not confirm subscription");
                    }
                }
                self.transition(ConnectionState::Streaming);
                Ok(Action::None)
            }
            (ConnectionState::Streaming, Reply::Update { channel, payload }) => {
                Ok(Action::Dispatch { channel, payload })
            }
            (ConnectionState::Streaming, reply) => {
                debug!(kind = %reply.kind(), "Ignoring repeated handshake reply");
                Ok(Action::None)
            }
            (state, reply) => Err(FrameError::Anomaly {
                state,
                kind: reply.kind(),
            }),
        }
    }

    /// The transport is gone
    pub fn on_disconnected(&mut self) {
        self.transition(ConnectionState::Disconnected);
    }

    fn transition(&mut self, next: ConnectionState) {
        if self.state != next {
            info!(from = %self.state, to = %next, "Stream state changed");
            self.state = next;
        }
    }
}
