//! Routes update payloads to the callback registered for their channel

use alpaca_types::Channel;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Callback receiving the raw `data` text of an update
pub type UpdateCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Channel-keyed callback map
///
/// Read-only once the connection starts. Callbacks run synchronously on the
/// receive path, so a slow callback delays every later frame; hand heavy
/// work off to another task.
#[derive(Clone, Default)]
pub struct Dispatcher {
    callbacks: HashMap<Channel, UpdateCallback>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("channels", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Dispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback for `channel`, replacing any previous one
    pub fn on<F>(mut self, channel: Channel, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.callbacks.insert(channel, Arc::new(f));
        self
    }

    /// Returns true if `channel` has a callback
    pub fn handles(&self, channel: Channel) -> bool {
        self.callbacks.contains_key(&channel)
    }

    /// Invoke the callback for `channel` with `payload`.
    ///
    /// Returns false, after a warning, when no callback is registered.
    pub fn dispatch(&self, channel: Channel, payload: &str) -> bool {
        match self.callbacks.get(&channel) {
            Some(callback) => {
                callback(payload);
                true
            }
            None => {
                warn!(%channel, "Dropping update for channel without a callback");
                false
            }
        }
    }
}
