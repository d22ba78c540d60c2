//! Inbound feed events.
//!
//! Every feed adapter, real or simulated, produces the same two event
//! shapes: book updates and trade prints. Events are validated once at the
//! engine boundary so malformed input can never reach the ledgers.

use serde::{Deserialize, Serialize};

use super::{Price, Quantity, TimestampMs};
use crate::error::Error;

/// Side of the book an event applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy interest (bids)
    Buy,
    /// Sell interest (asks)
    Sell,
}

impl Side {
    /// Get the opposite side
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// What an update event does to a price level
///
/// `Add` and `Update` are deliberately interchangeable: both replace the
/// level outright. `Delete` removes it regardless of the carried quantity.
/// This keeps the book state machine total - any (action, quantity) pair
/// has a defined result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Insert a new price level
    Add,
    /// Replace the quantity at an existing level
    Update,
    /// Remove the level (quantity is ignored)
    Delete,
}

/// A single book update from the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// Instrument symbol
    pub symbol: String,
    /// Price level being changed
    pub price: Price,
    /// New aggregated quantity at that level
    pub quantity: Quantity,
    /// Side of the book
    pub side: Side,
    /// What to do with the level
    pub action: Action,
    /// Event time at the source (Unix ms)
    pub timestamp: TimestampMs,
}

impl UpdateEvent {
    /// Validate the event before it touches any book state
    ///
    /// Rejects empty symbols and non-finite or non-positive prices. A
    /// non-positive quantity is legal - the ledger maps it to level
    /// deletion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedEvent`] describing the first violation.
    pub fn validate(&self) -> Result<(), Error> {
        validate_common(&self.symbol, self.price)
    }
}

/// A single executed trade from the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Instrument symbol
    pub symbol: String,
    /// Execution price
    pub price: Price,
    /// Executed quantity
    pub quantity: Quantity,
    /// Aggressor side
    pub side: Side,
    /// Execution time (Unix ms)
    pub timestamp: TimestampMs,
}

impl TradeEvent {
    /// Validate the event before it is appended to a trade log
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedEvent`] for an empty symbol, non-finite or
    /// non-positive price, or non-positive quantity.
    pub fn validate(&self) -> Result<(), Error> {
        validate_common(&self.symbol, self.price)?;
        if self.quantity <= 0 {
            return Err(Error::MalformedEvent(format!(
                "trade quantity must be positive, got {}",
                self.quantity
            )));
        }
        Ok(())
    }
}

fn validate_common(symbol: &str, price: Price) -> Result<(), Error> {
    if symbol.is_empty() {
        return Err(Error::MalformedEvent("empty symbol".to_string()));
    }
    if !price.is_finite() {
        return Err(Error::MalformedEvent(format!(
            "price is not finite: {price}"
        )));
    }
    if price <= 0.0 {
        return Err(Error::MalformedEvent(format!(
            "price must be positive, got {price}"
        )));
    }
    Ok(())
}

/// A trade as stored in the log and published to subscribers
///
/// Serializes to the wire shape
/// `{"type":"trade","symbol":...,"price":...,"quantity":...,"side":"buy","timestamp":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Constant discriminator, always `"trade"` on the wire
    #[serde(rename = "type", default = "trade_tag")]
    pub kind: String,
    /// Instrument symbol
    pub symbol: String,
    /// Execution price
    pub price: Price,
    /// Executed quantity
    pub quantity: Quantity,
    /// Aggressor side
    pub side: Side,
    /// Execution time (Unix ms)
    pub timestamp: TimestampMs,
}

fn trade_tag() -> String {
    "trade".to_string()
}

impl From<TradeEvent> for Trade {
    fn from(event: TradeEvent) -> Self {
        Self {
            kind: trade_tag(),
            symbol: event.symbol,
            price: event.price,
            quantity: event.quantity,
            side: event.side,
            timestamp: event.timestamp,
        }
    }
}
