//! Simulated feed driver.
//!
//! Generates uniform-random book updates and occasional trade prints, the
//! stand-in for a real feed parser/normalizer. The engine does not care
//! where events come from; any adapter producing [`UpdateEvent`] and
//! [`TradeEvent`] can replace this module.
//!
//! The driver runs as a scheduled tokio task with a cooperative shutdown
//! signal; stopping it lets the in-flight update/publish pair complete
//! before the task exits.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::engine::UpdateProcessor;
use crate::types::{now_ms, Action, Side, TradeEvent, UpdateEvent};

/// Tuning knobs for the simulated feed
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Symbols to generate updates for
    pub symbols: Vec<String>,
    /// Delay between ticks (one update per symbol per tick)
    pub tick_interval: Duration,
    /// Uniform price range
    pub price_range: (f64, f64),
    /// Uniform quantity range
    pub quantity_range: (i64, i64),
    /// A trade fires roughly once per this many updates
    pub trade_one_in: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["NIFTY".to_string()],
            tick_interval: Duration::from_millis(10),
            price_range: (99.0, 101.0),
            quantity_range: (100, 10_000),
            trade_one_in: 10,
        }
    }
}

/// Random event generator feeding an [`UpdateProcessor`]
#[derive(Debug)]
pub struct FeedDriver {
    config: FeedConfig,
}

impl FeedDriver {
    /// Create a driver with the given configuration
    #[must_use]
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    /// Spawn the generation loop
    ///
    /// Runs until the returned handle is stopped. Each tick produces one
    /// update per configured symbol plus, with probability
    /// `1/trade_one_in`, a trade print.
    #[must_use]
    pub fn start(self, engine: Arc<UpdateProcessor>) -> FeedHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let config = self.config;

        let task = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut ticker = tokio::time::interval(config.tick_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            info!(symbols = ?config.symbols, "feed driver started");

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        for symbol in &config.symbols {
                            drive_symbol(&engine, &config, symbol, &mut rng).await;
                        }
                    }
                }
            }
            info!("feed driver stopped");
        });

        FeedHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

async fn drive_symbol(
    engine: &UpdateProcessor,
    config: &FeedConfig,
    symbol: &str,
    rng: &mut StdRng,
) {
    let (price_lo, price_hi) = config.price_range;
    let (qty_lo, qty_hi) = config.quantity_range;
    let timestamp = now_ms();

    let update = UpdateEvent {
        symbol: symbol.to_string(),
        price: rng.gen_range(price_lo..price_hi),
        quantity: rng.gen_range(qty_lo..qty_hi),
        side: if rng.gen_bool(0.5) {
            Side::Buy
        } else {
            Side::Sell
        },
        action: Action::Update,
        timestamp,
    };
    if let Err(e) = engine.process_update(update).await {
        warn!(symbol, error = %e, "generated update rejected");
    }

    if rng.gen_range(0..config.trade_one_in) == 0 {
        let trade = TradeEvent {
            symbol: symbol.to_string(),
            price: rng.gen_range(price_lo..price_hi),
            quantity: rng.gen_range(qty_lo..qty_hi) / 10 + 1,
            side: if rng.gen_bool(0.5) {
                Side::Buy
            } else {
                Side::Sell
            },
            timestamp,
        };
        if let Err(e) = engine.process_trade(trade).await {
            warn!(symbol, error = %e, "generated trade rejected");
        }
    }
}

/// Handle to a running feed task
#[derive(Debug)]
pub struct FeedHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl FeedHandle {
    /// Signal the feed to stop and wait for the task to finish
    ///
    /// No new events are produced after the signal; the event being
    /// processed when it fires completes its publish attempt first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}
