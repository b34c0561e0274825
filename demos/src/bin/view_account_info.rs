//! Print account status, buying power and today's gain/loss
//!
//! Run: cargo run --bin view_account_info

use alpaca_config::Environment;
use alpaca_rest::AlpacaClient;
use colored::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let mut env = Environment::new();
    let client = AlpacaClient::new(&mut env)?;

    let account = client.get_account().await?;

    if account.trading_blocked {
        println!("{} Account is currently restricted from trading.", "!".red());
    }
    println!("${} is available as buying power.", account.buying_power);

    let gain_loss = account.gain_loss();
    let line = format!("Today's portfolio balance change: ${}", gain_loss);
    if gain_loss.is_sign_negative() {
        println!("{}", line.red());
    } else {
        println!("{}", line.green());
    }

    Ok(())
}
