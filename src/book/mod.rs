//! Order book state: price ledgers, per-symbol books, trade logs and the
//! registry that owns them.
//!
//! The data structures here carry the crate's real invariants:
//!
//! - A stored price level always has a positive quantity
//! - Best bid/ask are computed from the ledgers at read time, never cached
//! - The trade log is bounded (oldest evicted first)
//! - All mutation goes through [`BookRegistry`], which guards each symbol's
//!   book and trade log with independent locks
//!
//! # Example
//!
//! ```rust
//! use tick_engine::book::OrderBook;
//! use tick_engine::types::{Action, Side};
//!
//! let mut book = OrderBook::new("NIFTY");
//! book.apply_update(Side::Buy, 100.0, 1000, Action::Add);
//! book.apply_update(Side::Sell, 102.0, 800, Action::Add);
//!
//! assert_eq!(book.best_bid(), Some((100.0, 1000)));
//! assert_eq!(book.spread(), 2.0);
//! ```

pub mod ledger;
pub mod registry;
pub mod trades;

mod orderbook;

pub use ledger::PriceLedger;
pub use orderbook::OrderBook;
pub use registry::BookRegistry;
pub use trades::{TradeLog, TRADE_LOG_CAPACITY};
