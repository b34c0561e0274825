//! REST API client for the Alpaca trading and market data APIs
//!
//! # Features
//!
//! - **Account**: Account details, configurations and activities
//! - **Trading**: Submit, replace, cancel and list orders; open and close positions
//! - **Reference**: Assets, market clock and calendar, watchlists
//! - **Portfolio**: Equity and profit/loss history
//! - **Market Data**: Historical bars, last trade and last quote
//!
//! # Authentication
//!
//! Every request carries the `APCA-API-KEY-ID` and `APCA-API-SECRET-KEY`
//! headers, taken from an [`alpaca_config::Environment`].
//!
//! # Example
//!
//! ```no_run
//! use alpaca_config::Environment;
//! use alpaca_rest::{AlpacaClient, OrderRequest};
//! use alpaca_types::OrderSide;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut env = Environment::new();
//!     let client = AlpacaClient::new(&mut env)?;
//!
//!     let clock = client.get_clock().await?;
//!     println!("Market open: {}", clock.is_open);
//!
//!     let order = OrderRequest::market("AAPL", OrderSide::Buy, Decimal::ONE);
//!     let placed = client.submit_order(&order).await?;
//!     println!("Order {} is {}", placed.id, placed.status);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

// Re-export main types
pub use client::{api_url, AlpacaClient, ClientConfig};
pub use endpoints::{KEY_ID_HEADER, SECRET_KEY_HEADER};
pub use error::{RestError, RestResult};

// Re-export endpoint-specific types
pub use types::{
    ActivityQuery, BarsQuery, BulkOrderResult, OrderQuery, OrderRequest, PortfolioHistoryQuery,
    ReplaceOrderRequest, StopLoss, TakeProfit,
};
