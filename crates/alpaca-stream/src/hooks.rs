//! Observability hooks for stream lifecycle monitoring
//!
//! Hooks observe the connection without taking part in it: they are told
//! about state changes, frames, non-fatal errors and the final disconnect.
//!
//! # Example
//!
//! ```
//! use alpaca_stream::hooks::Hooks;
//!
//! let hooks = Hooks::new()
//!     .on_state_change(|state| {
//!         println!("State: {:?}", state);
//!     })
//!     .on_error(|kind, detail| {
//!         eprintln!("{}: {}", kind, detail);
//!     })
//!     .on_disconnect(|reason| {
//!         eprintln!("Disconnected: {}", reason);
//!     });
//! ```

use std::fmt;
use std::sync::Arc;

use crate::events::{DisconnectReason, ErrorKind};
use crate::session::ConnectionState;

/// Type alias for hook callbacks
pub type ErrorHook = Arc<dyn Fn(ErrorKind, &str) + Send + Sync>;
pub type StateChangeHook = Arc<dyn Fn(ConnectionState) + Send + Sync>;
pub type MessageHook = Arc<dyn Fn(usize) + Send + Sync>;
pub type DisconnectHook = Arc<dyn Fn(&DisconnectReason) + Send + Sync>;

/// Observability hooks container
///
/// All hooks are optional and run synchronously on the receive path. Keep
/// them fast to avoid delaying frame processing.
#[derive(Clone, Default)]
pub struct Hooks {
    pub(crate) on_error: Option<ErrorHook>,
    pub(crate) on_state_change: Option<StateChangeHook>,
    pub(crate) on_message: Option<MessageHook>,
    pub(crate) on_disconnect: Option<DisconnectHook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_error", &self.on_error.as_ref().map(|_| "..."))
            .field("on_state_change", &self.on_state_change.as_ref().map(|_| "..."))
            .field("on_message", &self.on_message.as_ref().map(|_| "..."))
            .field("on_disconnect", &self.on_disconnect.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Hooks {
    /// Create a new empty hooks container
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for non-fatal errors
    ///
    /// Called for discarded frames, out-of-order handshake replies, rejected
    /// credentials and transport errors.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(ErrorKind, &str) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Register a callback for lifecycle state changes
    pub fn on_state_change<F>(mut self, f: F) -> Self
    where
        F: Fn(ConnectionState) + Send + Sync + 'static,
    {
        self.on_state_change = Some(Arc::new(f));
        self
    }

    /// Register a callback for received frames
    ///
    /// Called on each text frame with its size in bytes.
    pub fn on_message<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_message = Some(Arc::new(f));
        self
    }

    /// Register a callback for the end of the connection
    pub fn on_disconnect<F>(mut self, f: F) -> Self
    where
        F: Fn(&DisconnectReason) + Send + Sync + 'static,
    {
        self.on_disconnect = Some(Arc::new(f));
        self
    }

    pub(crate) fn invoke_error(&self, kind: ErrorKind, detail: &str) {
        if let Some(ref hook) = self.on_error {
            hook(kind, detail);
        }
    }

    pub(crate) fn invoke_state_change(&self, state: ConnectionState) {
        if let Some(ref hook) = self.on_state_change {
            hook(state);
        }
    }

    pub(crate) fn invoke_message(&self, size: usize) {
        if let Some(ref hook) = self.on_message {
            hook(size);
        }
    }

    pub(crate) fn invoke_disconnect(&self, reason: &DisconnectReason) {
        if let Some(ref hook) = self.on_disconnect {
            hook(reason);
        }
    }
}
