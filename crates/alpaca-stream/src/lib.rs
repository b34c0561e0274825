//! Account streaming WebSocket client for the Alpaca trading API
//!
//! Connects to `wss://<trading host>/stream`, authenticates, subscribes to
//! `trade_updates` and/or `account_updates`, and hands each update's raw
//! `data` text to a caller callback.
//!
//! # Features
//!
//! - Explicit handshake state machine ([`Session`]) with no I/O of its own
//! - Malformed or unexpected frames are logged and skipped, never fatal
//! - Configurable handshake timeout and a cloneable [`ShutdownHandle`]
//! - Observability [`Hooks`] for state changes, errors and disconnects
//!
//! # Example
//!
//! ```no_run
//! use alpaca_config::Environment;
//! use alpaca_types::{Decode, TradeUpdate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut env = Environment::new();
//!
//!     let reason = alpaca_stream::run(
//!         &mut env,
//!         |payload| match TradeUpdate::decode(payload) {
//!             Ok(update) => println!("{:?} {}", update.event, update.order.symbol),
//!             Err(e) => eprintln!("bad trade update: {}", e),
//!         },
//!         |payload| println!("account update: {}", payload),
//!     )
//!     .await?;
//!
//!     println!("stream ended: {}", reason);
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod events;
pub mod handler;
pub mod hooks;
pub mod session;
pub mod transport;

// Re-export main types
pub use connection::{ShutdownHandle, StreamConfig, StreamConnection};
pub use dispatch::{Dispatcher, UpdateCallback};
pub use endpoint::{stream_url, Endpoint};
pub use error::{StreamError, StreamResult};
pub use events::{DisconnectReason, ErrorKind};
pub use handler::{run, StreamHandler};
pub use hooks::Hooks;
pub use session::{Action, ConnectionState, FrameError, Session};
pub use transport::{Incoming, Transport, TransportError, WsTransport};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;
