//! Socket layer under the account stream
//!
//! [`StreamConnection`](crate::connection::StreamConnection) reaches the
//! server only through [`Transport`]. [`WsTransport`] is the production
//! implementation; [`MockTransport`] replays a scripted conversation so the
//! handshake can be tested offline.
//!
//! # Example
//!
//! ```no_run
//! use alpaca_stream::transport::{Incoming, Transport, TransportError, WsTransport};
//!
//! async fn example() -> Result<(), TransportError> {
//!     let mut transport = WsTransport::new("wss://paper-api.alpaca.markets/stream");
//!     transport.connect().await?;
//!     transport.send(r#"{"action":"listen","data":{"streams":[]}}"#).await?;
//!     if let Incoming::Text(reply) = transport.recv().await? {
//!         println!("Received: {}", reply);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, protocol::frame::coding::CloseCode, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, instrument, trace};

/// Close code reported when the peer's close frame had no payload
pub const NO_STATUS_CODE: u16 = 1005;

/// Socket-level failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The socket or TLS/WebSocket upgrade could not be established
    #[error("could not open stream socket: {0}")]
    ConnectionFailed(String),

    /// Connecting took longer than the configured limit
    #[error("no connection after {0:?}")]
    ConnectTimeout(Duration),

    /// The socket went away without a close frame
    #[error("stream socket closed")]
    ConnectionClosed,

    #[error("could not write frame: {0}")]
    SendFailed(String),

    #[error("could not read frame: {0}")]
    ReceiveFailed(String),

    /// `send`/`recv` before `connect`, or after the socket closed
    #[error("stream socket is not open")]
    NotConnected,

    /// A frame arrived that cannot be turned into text
    #[error("unreadable frame: {0}")]
    Protocol(String),
}

/// What [`Transport::recv`] yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// Frame contents as text
    Text(String),
    /// The server sent a close frame
    Closed {
        /// Close code, [`NO_STATUS_CODE`] if absent
        code: u16,
        reason: String,
    },
}

/// Message-level access to the stream socket
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the socket
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// Write one text frame
    async fn send(&mut self, message: &str) -> Result<(), TransportError>;

    /// Wait for the next data frame or close. Control frames are absorbed.
    async fn recv(&mut self) -> Result<Incoming, TransportError>;

    /// Start a close handshake and drop the socket
    async fn close(&mut self) -> Result<(), TransportError>;

    fn is_connected(&self) -> bool;

    /// URL this transport connects to
    fn endpoint(&self) -> &str;
}

/// Map one WebSocket message onto an [`Incoming`] event.
///
/// Returns `None` for ping/pong and raw frames. The server delivers updates
/// as binary frames holding UTF-8 JSON, so binary is decoded like text.
pub fn read_message(message: Message) -> Option<Result<Incoming, TransportError>> {
    match message {
        Message::Text(text) => Some(Ok(Incoming::Text(text))),
        Message::Binary(bytes) => Some(
            String::from_utf8(bytes)
                .map(Incoming::Text)
                .map_err(|e| TransportError::Protocol(e.to_string())),
        ),
        Message::Close(Some(frame)) => Some(Ok(Incoming::Closed {
            code: u16::from(frame.code),
            reason: frame.reason.into_owned(),
        })),
        Message::Close(None) => Some(Ok(Incoming::Closed {
            code: NO_STATUS_CODE,
            reason: String::new(),
        })),
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => None,
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// tokio-tungstenite transport over `ws://` or `wss://`
pub struct WsTransport {
    url: String,
    connect_timeout: Duration,
    socket: Option<Socket>,
}

impl WsTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: Duration::from_secs(10),
            socket: None,
        }
    }

    /// Limit how long [`connect`](Transport::connect) may take
    pub fn with_connect_timeout(mut self, limit: Duration) -> Self {
        self.connect_timeout = limit;
        self
    }

    fn socket(&mut self) -> Result<&mut Socket, TransportError> {
        self.socket.as_mut().ok_or(TransportError::NotConnected)
    }
}

#[async_trait]
impl Transport for WsTransport {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn connect(&mut self) -> Result<(), TransportError> {
        let limit = self.connect_timeout;
        let (socket, response) = tokio::time::timeout(limit, connect_async(self.url.as_str()))
            .await
            .map_err(|_| TransportError::ConnectTimeout(limit))?
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

        debug!(status = %response.status(), "Stream socket open");
        self.socket = Some(socket);
        Ok(())
    }

    async fn send(&mut self, message: &str) -> Result<(), TransportError> {
        self.socket()?
            .send(Message::Text(message.to_owned()))
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    async fn recv(&mut self) -> Result<Incoming, TransportError> {
        loop {
            let next = self.socket()?.next().await;
            let message = match next {
                Some(Ok(message)) => message,
                Some(Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed)) | None => {
                    self.socket = None;
                    return Err(TransportError::ConnectionClosed);
                }
                Some(Err(e)) => return Err(TransportError::ReceiveFailed(e.to_string())),
            };

            match read_message(message) {
                Some(Ok(closed @ Incoming::Closed { .. })) => {
                    self.socket = None;
                    return Ok(closed);
                }
                Some(event) => return event,
                None => trace!("Skipping control frame"),
            }
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        match self.socket.take() {
            Some(mut socket) => socket
                .close(None)
                .await
                .map_err(|e| TransportError::SendFailed(e.to_string())),
            None => Ok(()),
        }
    }

    fn is_connected(&self) -> bool {
        self.socket.is_some()
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// Messages written to a [`MockTransport`], shared so tests can read them
/// after the transport has moved into a connection
#[cfg(any(test, feature = "test-utils"))]
pub type SentLog = std::sync::Arc<parking_lot::Mutex<Vec<String>>>;

/// Scripted transport
///
/// `recv` replays queued events in order. Once the script runs out it
/// reports a dropped socket, or never returns if `pend_when_empty` is set.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockTransport {
    url: String,
    open: bool,
    script: std::collections::VecDeque<Result<Incoming, TransportError>>,
    sent: SentLog,
    /// Make `connect` fail
    pub fail_connect: bool,
    /// Hang in `connect`
    pub pend_connect: bool,
    /// Make every `send` fail
    pub fail_send: bool,
    /// Hang in `recv` once the script is exhausted
    pub pend_when_empty: bool,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            open: false,
            script: Default::default(),
            sent: SentLog::default(),
            fail_connect: false,
            pend_connect: false,
            fail_send: false,
            pend_when_empty: false,
        }
    }

    /// Queue a text frame
    pub fn push_response(&mut self, frame: impl Into<String>) {
        self.script.push_back(Ok(Incoming::Text(frame.into())));
    }

    /// Queue several text frames
    pub fn push_responses(&mut self, frames: impl IntoIterator<Item = impl Into<String>>) {
        self.script
            .extend(frames.into_iter().map(|frame| Ok(Incoming::Text(frame.into()))));
    }

    /// Queue a server close frame
    pub fn push_close(&mut self, code: u16, reason: impl Into<String>) {
        self.script.push_back(Ok(Incoming::Closed {
            code,
            reason: reason.into(),
        }));
    }

    /// Queue a receive failure
    pub fn push_error(&mut self, error: TransportError) {
        self.script.push_back(Err(error));
    }

    pub fn sent_log(&self) -> SentLog {
        self.sent.clone()
    }

    /// Copy of everything sent so far
    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn connect(&mut self) -> Result<(), TransportError> {
        if self.fail_connect {
            return Err(TransportError::ConnectionFailed("refused by mock".into()));
        }
        if self.pend_connect {
            std::future::pending::<()>().await;
        }
        self.open = true;
        Ok(())
    }

    async fn send(&mut self, message: &str) -> Result<(), TransportError> {
        match (self.open, self.fail_send) {
            (false, _) => Err(TransportError::NotConnected),
            (true, true) => Err(TransportError::SendFailed("rejected by mock".into())),
            (true, false) => {
                self.sent.lock().push(message.to_owned());
                Ok(())
            }
        }
    }

    async fn recv(&mut self) -> Result<Incoming, TransportError> {
        if !self.open {
            return Err(TransportError::NotConnected);
        }
        if let Some(event) = self.script.pop_front() {
            return event;
        }
        if self.pend_when_empty {
            std::future::pending::<()>().await;
        }
        self.open = false;
        Err(TransportError::ConnectionClosed)
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.open = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.open
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
