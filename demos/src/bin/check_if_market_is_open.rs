//! Report whether the market is open and list the next trading day's hours
//!
//! Run: cargo run --bin check_if_market_is_open

use alpaca_config::Environment;
use alpaca_rest::AlpacaClient;
use chrono::{Duration, Utc};
use colored::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let mut env = Environment::new();
    let client = AlpacaClient::new(&mut env)?;

    let clock = client.get_clock().await?;
    if clock.is_open {
        println!("The market is {}.", "open".green().bold());
    } else {
        println!("The market is {}.", "closed".red().bold());
        println!("It opens at {}.", clock.next_open);
    }

    let today = Utc::now().date_naive();
    let days = client.get_calendar(Some(today), Some(today + Duration::days(7))).await?;
    if let Some(day) = days.first() {
        println!("On {} the market opens at {} and closes at {}.", day.date, day.open, day.close);
    }

    Ok(())
}
