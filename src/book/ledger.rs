//! Price ledger: one side of one book.
//!
//! Backed by `BTreeMap` for sorted price levels, providing:
//!
//! - O(log n) insertion, deletion, and lookup
//! - O(1) access to the best level (via `first_key_value` / `last_key_value`)
//! - Ordered iteration for depth-of-book queries

use std::collections::BTreeMap;

use crate::types::{Price, PriceKey, Quantity, Side};

/// Sorted (price, quantity) levels for one side of a book.
///
/// Keys are unique prices; every stored entry has a positive quantity. An
/// upsert with a non-positive quantity removes the level, so a "zero level"
/// can never be observed. Priority order is pure price order - descending
/// for bids, ascending for asks - and needs no secondary tie-break because
/// price is the key.
#[derive(Debug, Clone)]
pub struct PriceLedger {
    side: Side,
    levels: BTreeMap<PriceKey, Quantity>,
}

impl PriceLedger {
    /// Create an empty ledger for the given side
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Which side of the book this ledger represents
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Set, replace, or remove the level at `price`
    ///
    /// A positive quantity replaces the level outright; zero or negative
    /// removes it (idempotent when absent). Never fails - price validity is
    /// the caller's concern.
    pub fn upsert(&mut self, price: Price, quantity: Quantity) {
        let key = PriceKey::from(price);
        if quantity > 0 {
            self.levels.insert(key, quantity);
        } else {
            self.levels.remove(&key);
        }
    }

    /// Best level: highest price for bids, lowest for asks
    #[must_use]
    pub fn best(&self) -> Option<(Price, Quantity)> {
        let entry = match self.side {
            Side::Buy => self.levels.last_key_value(),
            Side::Sell => self.levels.first_key_value(),
        };
        entry.map(|(&p, &q)| (p.into_inner(), q))
    }

    /// Up to `depth` levels in priority order, best first
    ///
    /// `depth == 0` yields an empty vector; a depth larger than the ledger
    /// yields every level.
    #[must_use]
    pub fn top(&self, depth: usize) -> Vec<(Price, Quantity)> {
        let mapped = |(&p, &q): (&PriceKey, &Quantity)| (p.into_inner(), q);
        match self.side {
            Side::Buy => self.levels.iter().rev().take(depth).map(mapped).collect(),
            Side::Sell => self.levels.iter().take(depth).map(mapped).collect(),
        }
    }

    /// Quantity at an exact price, if the level exists
    #[must_use]
    pub fn quantity_at(&self, price: Price) -> Option<Quantity> {
        self.levels.get(&PriceKey::from(price)).copied()
    }

    /// Number of price levels
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the ledger has no levels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_then_remove_round_trip() {
        let mut ledger = PriceLedger::new(Side::Buy);
        ledger.upsert(100.0, 1000);
        assert_eq!(ledger.quantity_at(100.0), Some(1000));

        ledger.upsert(100.0, 0);
        assert_eq!(ledger.quantity_at(100.0), None);
        assert!(ledger.is_empty());

        // Removing an absent level is idempotent
        ledger.upsert(100.0, 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_negative_quantity_removes() {
        let mut ledger = PriceLedger::new(Side::Sell);
        ledger.upsert(101.5, 400);
        ledger.upsert(101.5, -5);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_bid_best_is_maximum() {
        let mut ledger = PriceLedger::new(Side::Buy);
        ledger.upsert(100.0, 1000);
        ledger.upsert(99.5, 500);
        ledger.upsert(101.0, 200);

        assert_eq!(ledger.best(), Some((101.0, 200)));

        ledger.upsert(101.0, 0);
        assert_eq!(ledger.best(), Some((100.0, 1000)));
    }

    #[test]
    fn test_ask_best_is_minimum() {
        let mut ledger = PriceLedger::new(Side::Sell);
        ledger.upsert(102.0, 800);
        ledger.upsert(103.0, 600);
        ledger.upsert(101.5, 400);

        assert_eq!(ledger.best(), Some((101.5, 400)));
    }

    #[test]
    fn test_top_priority_order() {
        let mut bids = PriceLedger::new(Side::Buy);
        bids.upsert(100.0, 1000);
        bids.upsert(99.5, 500);
        bids.upsert(101.0, 200);

        let top = bids.top(3);
        assert_eq!(top, vec![(101.0, 200), (100.0, 1000), (99.5, 500)]);

        let mut asks = PriceLedger::new(Side::Sell);
        asks.upsert(102.0, 800);
        asks.upsert(101.5, 400);
        asks.upsert(103.0, 600);

        let top = asks.top(2);
        assert_eq!(top, vec![(101.5, 400), (102.0, 800)]);
    }

    #[test]
    fn test_top_depth_bounds() {
        let mut ledger = PriceLedger::new(Side::Buy);
        ledger.upsert(100.0, 1);
        ledger.upsert(99.0, 2);

        assert!(ledger.top(0).is_empty());
        assert_eq!(ledger.top(1).len(), 1);
        // Oversized depth returns everything, not an error
        assert_eq!(ledger.top(50).len(), 2);
    }

    #[test]
    fn test_replace_existing_level() {
        let mut ledger = PriceLedger::new(Side::Buy);
        ledger.upsert(100.0, 1000);
        ledger.upsert(100.0, 42);

        assert_eq!(ledger.quantity_at(100.0), Some(42));
        assert_eq!(ledger.len(), 1);
    }
}
