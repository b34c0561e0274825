//! Entry point: resolve credentials, connect and stream account updates

use alpaca_config::Environment;
use alpaca_types::{Channel, ChannelSet};
use tracing::{info, instrument};

use crate::connection::{ShutdownHandle, StreamConfig, StreamConnection};
use crate::dispatch::Dispatcher;
use crate::endpoint::stream_url;
use crate::error::StreamResult;
use crate::events::DisconnectReason;
use crate::hooks::Hooks;
use crate::transport::{Transport, WsTransport};

/// Streams `trade_updates` and `account_updates` to a pair of callbacks
///
/// Each [`run`](Self::run) is one connection attempt. There is no automatic
/// reconnection; call `run` again after it returns to resume. Once the
/// [`shutdown_handle`](Self::shutdown_handle) fires, every later `run`
/// returns [`DisconnectReason::Shutdown`] immediately. Build a new handler
/// to stream again.
///
/// # Example
///
/// ```no_run
/// use alpaca_config::Environment;
/// use alpaca_stream::StreamHandler;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut env = Environment::new();
///     let handler = StreamHandler::new(
///         |update| println!("trade update: {}", update),
///         |update| println!("account update: {}", update),
///     );
///
///     let reason = handler.run(&mut env).await?;
///     println!("stream ended: {}", reason);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StreamHandler {
    dispatcher: Dispatcher,
    channels: ChannelSet,
    hooks: Hooks,
    config: StreamConfig,
    shutdown: ShutdownHandle,
}

impl StreamHandler {
    /// Create a handler subscribed to both channels
    pub fn new<F, G>(on_trade_update: F, on_account_update: G) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
        G: Fn(&str) + Send + Sync + 'static,
    {
        Self::with_dispatcher(
            Dispatcher::new()
                .on(Channel::TradeUpdates, on_trade_update)
                .on(Channel::AccountUpdates, on_account_update),
        )
    }

    /// Create a handler from an existing dispatcher. Only channels with a
    /// registered callback are subscribed.
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        let channels = Channel::ALL
            .into_iter()
            .filter(|channel| dispatcher.handles(*channel))
            .collect();
        Self {
            dispatcher,
            channels,
            hooks: Hooks::default(),
            config: StreamConfig::default(),
            shutdown: ShutdownHandle::new(),
        }
    }

    /// Subscribe to exactly these channels. Updates on channels without a
    /// callback are dropped with a warning.
    pub fn with_channels(mut self, channels: impl IntoIterator<Item = Channel>) -> Self {
        self.channels = channels.into_iter().collect();
        self
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

    /// Channels that will be requested in the listen message
    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    /// Handle that stops a running stream. Shutdown applies to every later
    /// `run` on this handler as well.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Resolve credentials from `env` and stream until the connection ends.
    ///
    /// Configuration problems fail before any connection attempt.
    #[instrument(skip(self, env))]
    pub async fn run(&self, env: &mut Environment) -> StreamResult<DisconnectReason> {
        let credentials = env.ensure_parsed()?;
        let url = stream_url(credentials.base_url());
        info!(%url, channels = self.channels.len(), "Starting account stream");

        let transport = WsTransport::new(url).with_connect_timeout(self.config.connect_timeout);
        self.run_with_transport(transport, credentials.key_id(), credentials.secret_key())
            .await
    }

    /// Stream over a caller-supplied transport
    pub async fn run_with_transport<T: Transport>(
        &self,
        transport: T,
        key_id: &str,
        secret_key: &str,
    ) -> StreamResult<DisconnectReason> {
        StreamConnection::new(transport, self.channels.clone(), self.dispatcher.clone())
            .with_hooks(self.hooks.clone())
            .with_config(self.config.clone())
            .with_shutdown(self.shutdown.clone())
            .start(key_id, secret_key)
            .await
    }
}

/// Stream trade and account updates to two callbacks until disconnect.
///
/// Shorthand for [`StreamHandler::new`] followed by [`StreamHandler::run`].
pub async fn run<F, G>(
    env: &mut Environment,
    on_trade_update: F,
    on_account_update: G,
) -> StreamResult<DisconnectReason>
where
    F: Fn(&str) + Send + Sync + 'static,
    G: Fn(&str) + Send + Sync + 'static,
{
    StreamHandler::new(on_trade_update, on_account_update)
        .run(env)
        .await
}
