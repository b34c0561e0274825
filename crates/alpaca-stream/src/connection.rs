//! Connection lifecycle manager
//!
//! [`StreamConnection`] owns the transport and the [`Session`] for one
//! connection attempt. It sends the authenticate message once connected,
//! feeds every inbound frame through the session, carries out the resulting
//! actions, and returns when the connection ends.
//!
//! Frames are processed strictly one at a time in arrival order, and update
//! callbacks run inline on this task.

use alpaca_types::ChannelSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::dispatch::Dispatcher;
use crate::error::{StreamError, StreamResult};
use crate::events::{DisconnectReason, ErrorKind};
use crate::hooks::Hooks;
use crate::session::{Action, ConnectionState, FrameError, Session};
use crate::transport::{Incoming, Transport, TransportError};

/// Configuration for a streaming connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Limit on the transport `connect` call
    pub connect_timeout: Duration,
    /// Limit on each handshake step; `None` waits forever
    pub handshake_timeout: Option<Duration>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            handshake_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl StreamConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the limit on each handshake step
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = Some(timeout);
        self
    }

    /// Wait for handshake replies indefinitely
    pub fn without_handshake_timeout(mut self) -> Self {
        self.handshake_timeout = None;
        self
    }
}

/// Cloneable handle that stops a running stream
///
/// The connection closes its transport and returns
/// [`DisconnectReason::Shutdown`]. Requesting shutdown before the stream
/// starts makes it return immediately.
///
/// Shutdown is permanent: every later stream sharing this handle returns
/// `Shutdown` at once. Use a fresh handle to stream again.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownHandle {
    /// Create a new handle
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }

    /// Returns true once shutdown has been requested
    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Receive the next event, or `None` once `deadline` passes
async fn recv_before<T: Transport>(
    transport: &mut T,
    deadline: Option<Instant>,
) -> Option<Result<Incoming, TransportError>> {
    match deadline {
        Some(deadline) => timeout_at(deadline, transport.recv()).await.ok(),
        None => Some(transport.recv().await),
    }
}

enum Event {
    Shutdown,
    Received(Result<Incoming, TransportError>),
    TimedOut,
}

/// One streaming connection over a [`Transport`]
pub struct StreamConnection<T: Transport> {
    transport: T,
    session: Session,
    dispatcher: Dispatcher,
    hooks: Hooks,
    config: StreamConfig,
    shutdown: ShutdownHandle,
}

impl<T: Transport> StreamConnection<T> {
    /// Create a connection that subscribes to `channels` and routes updates
    /// through `dispatcher`
    pub fn new(transport: T, channels: ChannelSet, dispatcher: Dispatcher) -> Self {
        Self {
            transport,
            session: Session::new(channels),
            dispatcher,
            hooks: Hooks::default(),
            config: StreamConfig::default(),
            shutdown: ShutdownHandle::new(),
        }
    }

    /// Attach observability hooks
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Set the connection config
    pub fn with_config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an existing shutdown handle
    pub fn with_shutdown(mut self, shutdown: ShutdownHandle) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Handle that stops this connection
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        self.session.state()
    }

    /// Connect, authenticate, subscribe and deliver updates until the
    /// connection ends.
    ///
    /// Returns the disconnect reason on an orderly or abrupt close. Fails
    /// if the transport cannot connect, a send fails, or a handshake step
    /// exceeds the configured timeout.
    #[instrument(skip(self, key_id, secret_key), fields(url = %self.transport.endpoint()))]
    pub async fn start(mut self, key_id: &str, secret_key: &str) -> StreamResult<DisconnectReason> {
        let mut shutdown_rx = self.shutdown.subscribe();
        let mut observed = self.session.state();
        self.hooks.invoke_state_change(observed);

        let limit = self.config.connect_timeout;
        let connected = tokio::select! {
            biased;
            _ = shutdown_requested(&mut shutdown_rx) => None,
            result = tokio::time::timeout(limit, self.transport.connect()) => {
                Some(result.unwrap_or_else(|_| Err(TransportError::ConnectTimeout(limit))))
            }
        };
        match connected {
            None => return Ok(self.finish(DisconnectReason::Shutdown, &mut observed)),
            Some(Err(e)) => {
                error!("Failed to connect: {}", e);
                self.hooks.invoke_error(ErrorKind::Transport, &e.to_string());
                self.session.on_disconnected();
                self.observe(&mut observed, &mut None);
                return Err(StreamError::Transport(e));
            }
            Some(Ok(())) => info!("Connected to account stream"),
        }

        let authenticate = self.session.on_connected(key_id, secret_key);
        let mut deadline = None;
        self.observe(&mut observed, &mut deadline);
        self.send(&authenticate, &mut observed).await?;

        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown_requested(&mut shutdown_rx) => Event::Shutdown,
                received = recv_before(&mut self.transport, deadline) => match received {
                    Some(result) => Event::Received(result),
                    None => Event::TimedOut,
                },
            };

            match event {
                Event::Shutdown => {
                    info!("Shutdown requested");
                    if let Err(e) = self.transport.close().await {
                        debug!("Error closing transport: {}", e);
                    }
                    return Ok(self.finish(DisconnectReason::Shutdown, &mut observed));
                }
                Event::TimedOut => {
                    let state = self.session.state();
                    // Deadlines are only armed while handshaking, and the
                    // handshake timeout is set whenever one is armed.
                    let timeout = self.config.handshake_timeout.unwrap_or_default();
                    error!(%state, ?timeout, "Handshake timed out");
                    if let Err(e) = self.transport.close().await {
                        debug!("Error closing transport: {}", e);
                    }
                    self.session.on_disconnected();
                    self.observe(&mut observed, &mut deadline);
                    return Err(StreamError::HandshakeTimeout { state, timeout });
                }
                Event::Received(Ok(Incoming::Text(text))) => {
                    self.hooks.invoke_message(text.len());
                    debug!(len = text.len(), "Received frame");
                    self.handle_frame(&text, &mut observed).await?;
                    self.observe(&mut observed, &mut deadline);
                }
                Event::Received(Ok(Incoming::Closed { code, reason })) => {
                    return Ok(self.finish(DisconnectReason::ServerClosed { code, reason }, &mut observed));
                }
                Event::Received(Err(TransportError::ConnectionClosed))
                | Event::Received(Err(TransportError::NotConnected)) => {
                    return Ok(self.finish(DisconnectReason::ConnectionLost, &mut observed));
                }
                Event::Received(Err(e)) => {
                    error!("Transport error: {}", e);
                    self.hooks.invoke_error(ErrorKind::Transport, &e.to_string());
                    if !self.transport.is_connected() {
                        return Ok(self.finish(DisconnectReason::NetworkError(e.to_string()), &mut observed));
                    }
                }
            }
        }
    }

    async fn handle_frame(&mut self, text: &str, observed: &mut ConnectionState) -> StreamResult<()> {
        match self.session.on_frame(text) {
            Ok(Action::None) => {}
            Ok(Action::Send(message)) => self.send(&message, observed).await?,
            Ok(Action::Dispatch { channel, payload }) => {
                self.dispatcher.dispatch(channel, &payload);
            }
            Err(e @ FrameError::Decode(_)) => {
                error!("Discarding frame: {}", e);
                self.hooks.invoke_error(ErrorKind::Decode, &e.to_string());
            }
            Err(e @ FrameError::Anomaly { .. }) => {
                warn!("Protocol anomaly: {}", e);
                self.hooks.invoke_error(ErrorKind::ProtocolAnomaly, &e.to_string());
            }
            Err(e @ FrameError::Unauthorized) => {
                error!("Authentication failed: {}", e);
                self.hooks.invoke_error(ErrorKind::AuthorizationRejected, &e.to_string());
            }
        }
        Ok(())
    }

    async fn send(&mut self, message: &str, observed: &mut ConnectionState) -> StreamResult<()> {
        debug!(len = message.len(), "Sending control message");
        if let Err(e) = self.transport.send(message).await {
            error!("Send failed: {}", e);
            self.hooks.invoke_error(ErrorKind::Transport, &e.to_string());
            self.finish(DisconnectReason::NetworkError(e.to_string()), observed);
            return Err(StreamError::Transport(e));
        }
        Ok(())
    }

    fn finish(&mut self, reason: DisconnectReason, observed: &mut ConnectionState) -> DisconnectReason {
        self.session.on_disconnected();
        self.observe(observed, &mut None);
        info!("Stream disconnected: {}", reason);
        self.hooks.invoke_disconnect(&reason);
        reason
    }

    /// Report a state change to the hooks and re-arm the handshake deadline.
    /// A limit too large to add to the current instant arms no deadline.
    fn observe(&self, observed: &mut ConnectionState, deadline: &mut Option<Instant>) {
        let current = self.session.state();
        if current == *observed {
            return;
        }
        *observed = current;
        self.hooks.invoke_state_change(current);
        *deadline = if current.is_handshaking() {
            self.config
                .handshake_timeout
                .and_then(|t| Instant::now().checked_add(t))
        } else {
            None
        };
    }
}
