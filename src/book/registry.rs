//! Registry owning every symbol's book and trade log.
//!
//! # Design
//!
//! Two independent maps, one for books and one for trade logs, each behind a
//! `parking_lot::RwLock<FxHashMap<..>>`. The outer lock is held only long
//! enough to fetch or insert the per-symbol `Arc<RwLock<..>>`; mutation
//! happens under the per-symbol lock, so updates for different symbols never
//! serialize on each other, and a trade append never blocks a book update
//! for the same symbol.
//!
//! Snapshots are taken under the same per-symbol write lock as the mutation,
//! so the published view is exactly the post-mutation state.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::types::{BookSnapshot, Price, Quantity, Trade, TradeEvent, UpdateEvent};

use super::{OrderBook, TradeLog};

type SymbolMap<T> = RwLock<FxHashMap<String, Arc<RwLock<T>>>>;

/// Thread-safe owner of all per-symbol books and trade logs.
///
/// Entries are created lazily on the first event for an unseen symbol and
/// live for the process lifetime. The registry never hands out
/// mutation-capable references; callers get snapshots and recent-trade
/// slices only.
///
/// Safe to share across tasks via `Arc<BookRegistry>`.
#[derive(Debug, Default)]
pub struct BookRegistry {
    books: SymbolMap<OrderBook>,
    trades: SymbolMap<TradeLog>,
}

impl BookRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the book handle for `symbol`, creating it on first access.
    ///
    /// The double-checked read/write dance keeps the common path on the
    /// cheap read lock; the `entry` call under the write lock guarantees at
    /// most one instance per symbol under concurrent first access.
    fn book_handle(&self, symbol: &str) -> Arc<RwLock<OrderBook>> {
        if let Some(handle) = self.books.read().get(symbol) {
            return Arc::clone(handle);
        }
        let mut books = self.books.write();
        Arc::clone(
            books
                .entry(symbol.to_string())
                .or_insert_with(|| Arc::new(RwLock::new(OrderBook::new(symbol)))),
        )
    }

    fn trade_log_handle(&self, symbol: &str) -> Arc<RwLock<TradeLog>> {
        if let Some(handle) = self.trades.read().get(symbol) {
            return Arc::clone(handle);
        }
        let mut trades = self.trades.write();
        Arc::clone(
            trades
                .entry(symbol.to_string())
                .or_insert_with(|| Arc::new(RwLock::new(TradeLog::new()))),
        )
    }

    /// Apply a validated update and return the post-mutation snapshot
    ///
    /// Mutation and snapshot happen under one per-symbol write lock, so the
    /// snapshot is exactly the state this update produced.
    pub fn apply_update(&self, event: &UpdateEvent, depth: usize) -> BookSnapshot {
        let handle = self.book_handle(&event.symbol);
        let mut book = handle.write();
        book.apply_update(event.side, event.price, event.quantity, event.action);
        book.snapshot(depth)
    }

    /// Append a validated trade and return the stored record
    pub fn record_trade(&self, event: &TradeEvent) -> Trade {
        let trade = Trade::from(event.clone());
        let handle = self.trade_log_handle(&event.symbol);
        handle.write().append(trade.clone());
        trade
    }

    /// Depth snapshot of a symbol's book, or `None` if the symbol is unknown
    #[must_use]
    pub fn snapshot(&self, symbol: &str, depth: usize) -> Option<BookSnapshot> {
        let handle = Arc::clone(self.books.read().get(symbol)?);
        let snapshot = handle.read().snapshot(depth);
        Some(snapshot)
    }

    /// Best bid for a symbol
    #[must_use]
    pub fn best_bid(&self, symbol: &str) -> Option<(Price, Quantity)> {
        let handle = Arc::clone(self.books.read().get(symbol)?);
        let best = handle.read().best_bid();
        best
    }

    /// Best ask for a symbol
    #[must_use]
    pub fn best_ask(&self, symbol: &str) -> Option<(Price, Quantity)> {
        let handle = Arc::clone(self.books.read().get(symbol)?);
        let best = handle.read().best_ask();
        best
    }

    /// Spread for a symbol (`0.0` sentinel if one-sided or unknown)
    #[must_use]
    pub fn spread(&self, symbol: &str) -> Price {
        match self.books.read().get(symbol) {
            Some(handle) => {
                let handle = Arc::clone(handle);
                let spread = handle.read().spread();
                spread
            }
            None => 0.0,
        }
    }

    /// Last `n` trades for a symbol, oldest of the window first
    #[must_use]
    pub fn recent_trades(&self, symbol: &str, n: usize) -> Vec<Trade> {
        match self.trades.read().get(symbol) {
            Some(handle) => {
                let handle = Arc::clone(handle);
                let recent = handle.read().recent(n);
                recent
            }
            None => Vec::new(),
        }
    }

    /// All symbols with a book
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.books.read().keys().cloned().collect()
    }

    /// Number of tracked symbols
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    /// Whether no symbols are tracked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Side};

    fn update(symbol: &str, side: Side, price: f64, quantity: i64) -> UpdateEvent {
        UpdateEvent {
            symbol: symbol.to_string(),
            price,
            quantity,
            side,
            action: Action::Update,
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_lazy_creation() {
        let registry = BookRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.snapshot("NIFTY", 10), None);

        registry.apply_update(&update("NIFTY", Side::Buy, 100.0, 1000), 10);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.best_bid("NIFTY"), Some((100.0, 1000)));
    }

    #[test]
    fn test_update_returns_post_mutation_snapshot() {
        let registry = BookRegistry::new();
        let snapshot = registry.apply_update(&update("NIFTY", Side::Buy, 100.0, 1000), 10);
        assert_eq!(snapshot.bids, vec![(100.0, 1000)]);

        let snapshot = registry.apply_update(&update("NIFTY", Side::Buy, 100.0, 0), 10);
        assert!(snapshot.bids.is_empty());
    }

    #[test]
    fn test_symbols_are_independent() {
        let registry = BookRegistry::new();
        registry.apply_update(&update("NIFTY", Side::Buy, 100.0, 1000), 10);
        registry.apply_update(&update("BANKNIFTY", Side::Sell, 200.0, 50), 10);

        assert_eq!(registry.best_bid("NIFTY"), Some((100.0, 1000)));
        assert_eq!(registry.best_bid("BANKNIFTY"), None);
        assert_eq!(registry.best_ask("BANKNIFTY"), Some((200.0, 50)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_trades_do_not_touch_books() {
        let registry = BookRegistry::new();
        registry.record_trade(&TradeEvent {
            symbol: "NIFTY".to_string(),
            price: 100.0,
            quantity: 10,
            side: Side::Buy,
            timestamp: 1,
        });

        assert_eq!(registry.recent_trades("NIFTY", 5).len(), 1);
        // The book side of the registry never saw this symbol
        assert!(registry.is_empty());
    }

    #[test]
    fn test_spread_sentinel_for_unknown_symbol() {
        let registry = BookRegistry::new();
        assert_eq!(registry.spread("UNKNOWN"), 0.0);
    }

    #[test]
    fn test_concurrent_first_access_creates_one_book() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(BookRegistry::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                registry.apply_update(
                    &update("NIFTY", Side::Buy, 100.0 + i as f64, 100),
                    10,
                );
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 1);
        let snapshot = registry.snapshot("NIFTY", 20).unwrap();
        assert_eq!(snapshot.bids.len(), 8);
    }

    #[test]
    fn test_concurrent_same_price_last_writer_wins() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(BookRegistry::new());
        let a = Arc::clone(&registry);
        let b = Arc::clone(&registry);
        let t1 = thread::spawn(move || {
            for _ in 0..1000 {
                a.apply_update(&update("NIFTY", Side::Buy, 100.0, 111), 1);
            }
        });
        let t2 = thread::spawn(move || {
            for _ in 0..1000 {
                b.apply_update(&update("NIFTY", Side::Buy, 100.0, 222), 1);
            }
        });
        t1.join().unwrap();
        t2.join().unwrap();

        // Exactly one of the two written values survives, never a torn entry
        let (price, quantity) = registry.best_bid("NIFTY").unwrap();
        assert_eq!(price, 100.0);
        assert!(quantity == 111 || quantity == 222);
    }
}
