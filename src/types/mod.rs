//! Event and wire payload types.
//!
//! This module contains the typed events consumed from a feed adapter and
//! the serializable payloads published to subscribers.
//!
//! - [`events`] - Inbound update/trade events and boundary validation
//! - [`snapshot`] - Outbound book snapshots and trade payloads

pub mod events;
pub mod snapshot;

pub use events::{Action, Side, Trade, TradeEvent, UpdateEvent};
pub use snapshot::BookSnapshot;

use ordered_float::OrderedFloat;

/// Price in the feed's native decimal units
///
/// Prices arrive as decimals (e.g. 100.25) and are published unchanged, so
/// the crate keeps `f64` at the boundaries and wraps it in [`PriceKey`]
/// wherever a total order is required.
pub type Price = f64;

/// Price usable as a `BTreeMap` key
///
/// `f64` is not `Ord`; `OrderedFloat` supplies the total order. Event
/// validation rejects NaN and infinite prices before they can become keys.
pub type PriceKey = OrderedFloat<f64>;

/// Aggregated quantity at a price level
///
/// Signed so feed adapters can pass through non-positive values, which the
/// ledger treats as deletion of the level.
pub type Quantity = i64;

/// Timestamp in milliseconds since Unix epoch
pub type TimestampMs = u64;

/// Current wall-clock time in milliseconds since Unix epoch
#[must_use]
pub fn now_ms() -> TimestampMs {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as TimestampMs)
        .unwrap_or(0)
}
