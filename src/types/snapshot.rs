//! Outbound wire payloads.
//!
//! A snapshot is an immutable view of one book taken at a point in time.
//! Price levels serialize as `[price, quantity]` pairs, best first, matching
//! the `orderbook:{symbol}` channel contract.

use serde::{Deserialize, Serialize};

use super::{Price, Quantity, TimestampMs};

/// One price level on the wire: `[price, quantity]`
pub type WireLevel = (Price, Quantity);

/// Immutable depth snapshot of a single book
///
/// `timestamp` is the wall-clock instant the snapshot was produced, not the
/// originating event's time. `spread` is `best_ask - best_bid` when both
/// sides are populated and the sentinel `0.0` otherwise; a locked market is
/// therefore indistinguishable from a one-sided book on the wire (kept for
/// payload compatibility).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Instrument symbol
    pub symbol: String,
    /// Wall-clock time the snapshot was taken (Unix ms)
    pub timestamp: TimestampMs,
    /// Bid levels, best (highest price) first
    pub bids: Vec<WireLevel>,
    /// Ask levels, best (lowest price) first
    pub asks: Vec<WireLevel>,
    /// Best ask minus best bid, or `0.0` when either side is empty
    pub spread: Price,
}

impl BookSnapshot {
    /// Pub/sub channel this snapshot is published on
    #[must_use]
    pub fn channel(&self) -> String {
        format!("orderbook:{}", self.symbol)
    }

    /// Best bid level, if any
    #[must_use]
    pub fn best_bid(&self) -> Option<WireLevel> {
        self.bids.first().copied()
    }

    /// Best ask level, if any
    #[must_use]
    pub fn best_ask(&self) -> Option<WireLevel> {
        self.asks.first().copied()
    }
}

/// Pub/sub channel for trade prints of a symbol
#[must_use]
pub fn trades_channel(symbol: &str) -> String {
    format!("trades:{symbol}")
}
