//! Price change over a range of daily bars, plus last trade and quote
//!
//! Run: cargo run --bin get_historical_data

use alpaca_config::Environment;
use alpaca_rest::{AlpacaClient, BarsQuery};
use colored::*;
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let mut env = Environment::new();
    let client = AlpacaClient::new(&mut env)?;

    let query = BarsQuery::builder()
        .symbols(vec!["AAPL".to_string()])
        .start("2020-04-01T09:30:00-04:00")
        .end("2020-04-03T09:30:00-04:00")
        .build();
    let bars = client.get_bars(&query).await?;

    match bars.get("AAPL") {
        Some([first, .., last]) => {
            let change = (last.close - first.open) / first.open * Decimal::ONE_HUNDRED;
            println!("AAPL moved {}% over the time range.", change.round_dp(2).to_string().bold());
        }
        _ => println!("{} Not enough bars returned for AAPL", "!".yellow()),
    }

    let trade = client.get_last_trade("AAPL").await?;
    println!("The last traded price of AAPL was: ${}", trade.trade.price);

    let quote = client.get_last_quote("AAPL").await?;
    println!("The last quoted ask price of AAPL was: ${}", quote.quote.ask_price);

    Ok(())
}
