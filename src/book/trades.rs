//! Bounded per-symbol trade history.

use std::collections::VecDeque;

use crate::types::Trade;

/// Maximum number of trades retained per symbol
pub const TRADE_LOG_CAPACITY: usize = 1000;

/// Append-only trade history, oldest evicted first.
///
/// Write-mostly, read-rarely (diagnostics only). Eviction at capacity is
/// expected behavior, not a failure.
#[derive(Debug, Clone, Default)]
pub struct TradeLog {
    trades: VecDeque<Trade>,
}

impl TradeLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self {
            trades: VecDeque::with_capacity(TRADE_LOG_CAPACITY),
        }
    }

    /// Append a trade at the tail, evicting the oldest entry if the log is
    /// at capacity
    pub fn append(&mut self, trade: Trade) {
        if self.trades.len() == TRADE_LOG_CAPACITY {
            self.trades.pop_front();
        }
        self.trades.push_back(trade);
    }

    /// Last `n` trades in chronological order (oldest of the window first),
    /// or fewer if the log is shorter
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<Trade> {
        let start = self.trades.len().saturating_sub(n);
        self.trades.iter().skip(start).cloned().collect()
    }

    /// Number of retained trades
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Whether the log holds no trades
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}
