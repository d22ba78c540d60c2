//! Update processor: the pipeline from feed event to published payload.
//!
//! The protocol is strict: every accepted update event causes exactly one
//! ledger mutation followed by exactly one snapshot publish attempt; every
//! accepted trade event causes exactly one log append followed by exactly
//! one trade publish attempt. A failed publish is logged and counted but
//! never rolls back the mutation, never blocks, and never retries inline -
//! the registry's state is authoritative even when subscribers miss an
//! update.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{trace, warn};

use crate::book::BookRegistry;
use crate::publish::Publish;
use crate::types::snapshot::trades_channel;
use crate::types::{BookSnapshot, Trade, TradeEvent, UpdateEvent};
use crate::Result;

/// Monotonic counters for engine observability
#[derive(Debug, Default)]
pub struct EngineStats {
    updates_applied: AtomicU64,
    trades_recorded: AtomicU64,
    publishes_ok: AtomicU64,
    publish_failures: AtomicU64,
    events_rejected: AtomicU64,
}

/// Point-in-time copy of [`EngineStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatsSnapshot {
    /// Update events applied to a book
    pub updates_applied: u64,
    /// Trade events appended to a log
    pub trades_recorded: u64,
    /// Successful publish attempts
    pub publishes_ok: u64,
    /// Failed publish attempts (book state unaffected)
    pub publish_failures: u64,
    /// Events rejected at the validation boundary
    pub events_rejected: u64,
}

impl EngineStats {
    fn snapshot(&self) -> EngineStatsSnapshot {
        EngineStatsSnapshot {
            updates_applied: self.updates_applied.load(Ordering::Relaxed),
            trades_recorded: self.trades_recorded.load(Ordering::Relaxed),
            publishes_ok: self.publishes_ok.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
            events_rejected: self.events_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Serializes feed events into registry mutations and publish attempts.
///
/// Cheap to share: hold it in an `Arc` and call it from any number of
/// producer tasks; per-symbol locking lives in the registry.
pub struct UpdateProcessor {
    registry: Arc<BookRegistry>,
    publisher: Arc<dyn Publish>,
    depth: usize,
    stats: EngineStats,
}

impl std::fmt::Debug for UpdateProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateProcessor")
            .field("depth", &self.depth)
            .field("connected", &self.publisher.is_connected())
            .field("stats", &self.stats)
            .finish()
    }
}

impl UpdateProcessor {
    /// Create a processor publishing snapshots of `depth` levels per side
    pub fn new(registry: Arc<BookRegistry>, publisher: Arc<dyn Publish>, depth: usize) -> Self {
        Self {
            registry,
            publisher,
            depth,
            stats: EngineStats::default(),
        }
    }

    /// Process one book update: validate, mutate, publish
    ///
    /// Returns the snapshot that was handed to the publisher. The publish
    /// outcome is deliberately absent from the return value - it is
    /// observable through [`stats`](UpdateProcessor::stats) and the logs.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedEvent`](crate::Error::MalformedEvent) if the event
    /// fails boundary validation (the registry is untouched), or
    /// [`Error::Json`](crate::Error::Json) if the snapshot cannot be
    /// encoded.
    pub async fn process_update(&self, event: UpdateEvent) -> Result<BookSnapshot> {
        if let Err(e) = event.validate() {
            self.stats.events_rejected.fetch_add(1, Ordering::Relaxed);
            return Err(e);
        }

        let snapshot = self.registry.apply_update(&event, self.depth);
        self.stats.updates_applied.fetch_add(1, Ordering::Relaxed);

        let payload = serde_json::to_string(&snapshot)?;
        self.try_publish(&snapshot.channel(), &payload).await;
        Ok(snapshot)
    }

    /// Process one trade print: validate, append, publish
    ///
    /// # Errors
    ///
    /// Same contract as [`process_update`](UpdateProcessor::process_update).
    pub async fn process_trade(&self, event: TradeEvent) -> Result<Trade> {
        if let Err(e) = event.validate() {
            self.stats.events_rejected.fetch_add(1, Ordering::Relaxed);
            return Err(e);
        }

        let trade = self.registry.record_trade(&event);
        self.stats.trades_recorded.fetch_add(1, Ordering::Relaxed);

        let payload = serde_json::to_string(&trade)?;
        self.try_publish(&trades_channel(&trade.symbol), &payload).await;
        Ok(trade)
    }

    /// Fire-and-forget delivery; failures are counted, never propagated
    async fn try_publish(&self, channel: &str, payload: &str) {
        match self.publisher.publish(channel, payload).await {
            Ok(subscribers) => {
                self.stats.publishes_ok.fetch_add(1, Ordering::Relaxed);
                trace!(channel, subscribers, "payload published");
            }
            Err(e) => {
                self.stats.publish_failures.fetch_add(1, Ordering::Relaxed);
                warn!(channel, error = %e, "publish failed, book state unaffected");
            }
        }
    }

    /// Shared registry handle (read-only views)
    pub fn registry(&self) -> &Arc<BookRegistry> {
        &self.registry
    }

    /// Snapshot depth used for published payloads
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Current counter values
    pub fn stats(&self) -> EngineStatsSnapshot {
        self.stats.snapshot()
    }
}
