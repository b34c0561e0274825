//! Stream trade and account updates
//!
//! Prints every order event and account update until the server closes the
//! connection or Ctrl-C is pressed.
//!
//! Run: cargo run --bin run_stream_handler

use alpaca_config::Environment;
use alpaca_stream::{Hooks, StreamHandler};
use alpaca_types::{AccountUpdate, Decode, TradeUpdate};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut env = Environment::new();
    env.parse()?;

    let handler = StreamHandler::new(
        |payload| match TradeUpdate::decode(payload) {
            Ok(update) => println!(
                "{} {:?} {} {} @ {}",
                "TRADE".green().bold(),
                update.event,
                update.order.symbol,
                update.qty.map(|q| q.to_string()).unwrap_or_default(),
                update.price.map(|p| p.to_string()).unwrap_or_default(),
            ),
            Err(e) => eprintln!("{} {}: {}", "✗".red(), e, payload),
        },
        |payload| match AccountUpdate::decode(payload) {
            Ok(update) => println!("{} cash={} status={}", "ACCOUNT".cyan().bold(), update.cash, update.status),
            Err(e) => eprintln!("{} {}: {}", "✗".red(), e, payload),
        },
    )
    .with_hooks(
        Hooks::new()
            .on_state_change(|state| println!("{} {}", "→".dimmed(), state))
            .on_error(|kind, detail| eprintln!("{} {}: {}", "!".yellow(), kind, detail)),
    );

    let shutdown = handler.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.shutdown();
        }
    });

    let reason = handler.run(&mut env).await?;
    println!("Stream ended: {}", reason);
    Ok(())
}
