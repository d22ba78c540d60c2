//! Live demo - simulated feed into Redis pub/sub
//!
//! Usage:
//!   cargo run --example tick_feed
//!
//! Optional:
//!   TICK_REDIS_HOST=redis.internal  # Redis host (default: 127.0.0.1)
//!   TICK_REDIS_PORT=6380            # Redis port (default: 6379)
//!   TICK_SYMBOLS=NIFTY,BANKNIFTY    # Symbols to simulate (default: NIFTY)
//!
//! Watch the stream with: redis-cli psubscribe 'orderbook:*' 'trades:*'

use std::time::Duration;

use tick_engine::feed::{FeedConfig, FeedDriver};
use tick_engine::{Config, TickEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tick_engine=info".parse().unwrap()),
        )
        .init();

    let host = std::env::var("TICK_REDIS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("TICK_REDIS_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(6379);
    let symbols: Vec<String> = std::env::var("TICK_SYMBOLS")
        .unwrap_or_else(|_| "NIFTY".to_string())
        .split(',')
        .map(str::to_string)
        .collect();

    println!("=== Tick Engine Demo ===\n");

    let engine = TickEngine::new(Config::new(&host, port))?;
    match engine.connect().await {
        Ok(()) => println!("Connected to Redis at {host}:{port}"),
        Err(e) => println!("Redis unavailable ({e}); publishing will retry via heartbeat"),
    }

    let heartbeat = engine.start_heartbeat();
    let feed = FeedDriver::new(FeedConfig {
        symbols: symbols.clone(),
        ..FeedConfig::default()
    })
    .start(engine.processor());

    println!("Simulating {symbols:?}... Press Ctrl+C to stop.\n");

    // Print a status line every few seconds until interrupted
    let registry = engine.registry();
    let processor = engine.processor();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(Duration::from_secs(3)) => {
                let stats = processor.stats();
                for symbol in &symbols {
                    let best_bid = registry.best_bid(symbol);
                    let best_ask = registry.best_ask(symbol);
                    println!(
                        "{symbol}: bid={best_bid:?} ask={best_ask:?} spread={:.2} \
                         (applied={}, published={}, failed={})",
                        registry.spread(symbol),
                        stats.updates_applied,
                        stats.publishes_ok,
                        stats.publish_failures,
                    );
                }
            }
        }
    }

    println!("\nShutting down...");
    feed.stop().await;
    heartbeat.stop().await;

    let stats = processor.stats();
    println!(
        "Done. {} updates, {} trades, {} published, {} failed.",
        stats.updates_applied, stats.trades_recorded, stats.publishes_ok, stats.publish_failures
    );
    Ok(())
}
