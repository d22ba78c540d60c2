//! Per-symbol order book: a bid ledger and an ask ledger plus derived views.

use crate::types::{now_ms, Action, BookSnapshot, Price, Quantity, Side};

use super::PriceLedger;

/// Price-aggregated order book for a single symbol.
///
/// Best bid, best ask and spread are derived from the ledgers at read time,
/// never cached. The struct is not internally synchronized; [`super::BookRegistry`]
/// wraps each instance in a per-symbol lock.
#[derive(Debug, Clone)]
pub struct OrderBook {
    symbol: String,
    bids: PriceLedger,
    asks: PriceLedger,
}

impl OrderBook {
    /// Create a new empty book for the given symbol
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: PriceLedger::new(Side::Buy),
            asks: PriceLedger::new(Side::Sell),
        }
    }

    /// Get the symbol
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Apply one update to the book
    ///
    /// `Add` and `Update` both replace the level with the given quantity;
    /// `Delete` removes the level regardless of the quantity carried by the
    /// event. Total over all inputs - there is no error path.
    pub fn apply_update(&mut self, side: Side, price: Price, quantity: Quantity, action: Action) {
        let effective = match action {
            Action::Add | Action::Update => quantity,
            Action::Delete => 0,
        };
        match side {
            Side::Buy => self.bids.upsert(price, effective),
            Side::Sell => self.asks.upsert(price, effective),
        }
    }

    /// Best (highest) bid, or `None` if there are no bids
    #[must_use]
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best()
    }

    /// Best (lowest) ask, or `None` if there are no asks
    #[must_use]
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best()
    }

    /// Best ask minus best bid
    ///
    /// Returns the sentinel `0.0` when either side is empty, matching the
    /// wire payload contract. A genuinely locked market also reports 0.
    #[must_use]
    pub fn spread(&self) -> Price {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => ask - bid,
            _ => 0.0,
        }
    }

    /// Bid-side ledger (read-only)
    #[must_use]
    pub fn bids(&self) -> &PriceLedger {
        &self.bids
    }

    /// Ask-side ledger (read-only)
    #[must_use]
    pub fn asks(&self) -> &PriceLedger {
        &self.asks
    }

    /// Whether both sides are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Take an immutable depth snapshot, timestamped with the current
    /// wall-clock time
    #[must_use]
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        BookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: now_ms(),
            bids: self.bids.top(depth),
            asks: self.asks.top(depth),
            spread: self.spread(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_is_empty() {
        let book = OrderBook::new("NIFTY");
        assert_eq!(book.symbol(), "NIFTY");
        assert!(book.is_empty());
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.best_ask(), None);
        assert_eq!(book.spread(), 0.0);
    }

    #[test]
    fn test_bid_updates() {
        let mut book = OrderBook::new("NIFTY");
        book.apply_update(Side::Buy, 100.0, 1000, Action::Update);
        book.apply_update(Side::Buy, 99.5, 500, Action::Update);
        book.apply_update(Side::Buy, 101.0, 200, Action::Update);

        assert_eq!(book.best_bid(), Some((101.0, 200)));
        let top = book.bids().top(3);
        assert_eq!(top[0].0, 101.0);
        assert_eq!(top[1].0, 100.0);
        assert_eq!(top[2].0, 99.5);
    }

    #[test]
    fn test_spread() {
        let mut book = OrderBook::new("NIFTY");
        book.apply_update(Side::Sell, 102.0, 800, Action::Add);
        book.apply_update(Side::Buy, 100.0, 1000, Action::Add);

        assert_eq!(book.spread(), 2.0);
    }

    #[test]
    fn test_one_sided_spread_sentinel() {
        let mut book = OrderBook::new("NIFTY");
        book.apply_update(Side::Buy, 100.0, 1000, Action::Add);

        // One-sided book reports the 0 sentinel, not an error
        assert_eq!(book.spread(), 0.0);
    }

    #[test]
    fn test_zero_quantity_removes_level() {
        let mut book = OrderBook::new("NIFTY");
        book.apply_update(Side::Buy, 100.0, 1000, Action::Update);
        book.apply_update(Side::Buy, 100.0, 0, Action::Update);

        assert_eq!(book.best_bid(), None);
    }

    #[test]
    fn test_delete_ignores_quantity() {
        let mut book = OrderBook::new("NIFTY");
        book.apply_update(Side::Sell, 102.0, 800, Action::Add);
        // Delete carries a stale positive quantity; the level must still go
        book.apply_update(Side::Sell, 102.0, 999, Action::Delete);

        assert_eq!(book.best_ask(), None);
    }

    #[test]
    fn test_add_and_update_are_equivalent() {
        let mut a = OrderBook::new("A");
        let mut b = OrderBook::new("B");
        a.apply_update(Side::Buy, 100.0, 300, Action::Add);
        b.apply_update(Side::Buy, 100.0, 300, Action::Update);

        assert_eq!(a.best_bid(), b.best_bid());
    }

    #[test]
    fn test_snapshot_shape() {
        let mut book = OrderBook::new("NIFTY");
        book.apply_update(Side::Buy, 100.0, 1000, Action::Add);
        book.apply_update(Side::Sell, 102.0, 800, Action::Add);

        let snapshot = book.snapshot(5);
        assert_eq!(snapshot.symbol, "NIFTY");
        assert_eq!(snapshot.bids, vec![(100.0, 1000)]);
        assert_eq!(snapshot.asks, vec![(102.0, 800)]);
        assert_eq!(snapshot.spread, 2.0);
        assert!(snapshot.timestamp > 0);
    }

    #[test]
    fn test_snapshot_respects_depth() {
        let mut book = OrderBook::new("NIFTY");
        for i in 0..20 {
            book.apply_update(Side::Buy, 100.0 - i as f64 * 0.5, 100, Action::Add);
        }

        let snapshot = book.snapshot(10);
        assert_eq!(snapshot.bids.len(), 10);
        assert_eq!(snapshot.bids[0].0, 100.0);
    }
}
