//! Submit a market buy and a limit sell for the open
//!
//! Run: cargo run --bin place_new_orders

use alpaca_config::Environment;
use alpaca_rest::{AlpacaClient, OrderRequest};
use alpaca_types::{OrderSide, TimeInForce};
use colored::*;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let mut env = Environment::new();
    let client = AlpacaClient::new(&mut env)?;

    // One share of Apple at market price
    let buy = OrderRequest::market("AAPL", OrderSide::Buy, dec!(1));
    let order = client.submit_order(&buy).await?;
    println!("{} Buy order {} is {}", "✓".green(), order.id, order.status);

    // One share of AMD at $20.50 when the market opens
    let sell = OrderRequest::limit("AMD", OrderSide::Sell, dec!(1), dec!(20.50)).with_time_in_force(TimeInForce::Opg);
    let order = client.submit_order(&sell).await?;
    println!("{} Sell order {} is {}", "✓".green(), order.id, order.status);

    Ok(())
}
