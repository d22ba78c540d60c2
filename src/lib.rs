//! # tick-engine
//!
//! A low-latency market data engine: per-symbol, price-aggregated order
//! books with trade history, streaming every change to subscribers over
//! Redis pub/sub.
//!
//! ## Features
//!
//! - **Per-symbol orderbooks** - `BTreeMap` price ledgers with O(1) best
//!   bid/ask and depth queries
//! - **Bounded trade logs** - last 1000 prints per symbol, FIFO eviction
//! - **Concurrent pipeline** - per-symbol locking, so unrelated symbols
//!   never serialize each other
//! - **Best-effort publishing** - book state is authoritative; a down
//!   transport is reconnected by a heartbeat task, never blocking updates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tick_engine::feed::{FeedConfig, FeedDriver};
//! use tick_engine::{Config, TickEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tick_engine::Error> {
//!     let engine = TickEngine::new(Config::new("127.0.0.1", 6379))?;
//!     engine.connect().await?;
//!
//!     let heartbeat = engine.start_heartbeat();
//!     let feed = FeedDriver::new(FeedConfig::default()).start(engine.processor());
//!
//!     tokio::signal::ctrl_c().await.ok();
//!
//!     feed.stop().await;
//!     heartbeat.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! This crate is organized into several modules:
//!
//! - [`book`] - Price ledgers, orderbooks, trade logs and their registry
//! - [`engine`] - The update processor (event in, mutation + publish out)
//! - [`publish`] - The transport seam and the Redis publisher
//! - [`feed`] - Simulated feed driver
//! - [`config`] - Engine and transport configuration
//! - [`error`] - Error types for the crate
//!
//! ## Delivery semantics
//!
//! Publishing is fire-and-forget. A failed publish marks the connection
//! down and is retried by the heartbeat on its own schedule; the mutation
//! that triggered it is never rolled back. Subscribers that miss updates
//! see stale data until the transport recovers - there is no replay.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod book;
pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod publish;
pub mod types;

// Re-export main types at crate root for convenience
pub use config::Config;
pub use error::Error;

use std::sync::Arc;

use book::BookRegistry;
use engine::UpdateProcessor;
use publish::{HeartbeatHandle, Publish, RedisPublisher};

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The assembled engine: registry, processor, and Redis publisher.
///
/// Wires the components together and owns the configuration. Feed adapters
/// push events through [`processor`](TickEngine::processor); read-side
/// consumers query [`registry`](TickEngine::registry).
#[derive(Debug)]
pub struct TickEngine {
    config: Config,
    registry: Arc<BookRegistry>,
    publisher: Arc<RedisPublisher>,
    processor: Arc<UpdateProcessor>,
}

impl TickEngine {
    /// Assemble an engine from the given configuration
    ///
    /// Does not touch the network; call [`connect`](TickEngine::connect)
    /// to establish the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis URL composed from the configuration
    /// is invalid.
    pub fn new(config: Config) -> Result<Self> {
        let registry = Arc::new(BookRegistry::new());
        let publisher = Arc::new(RedisPublisher::new(&config)?);
        let processor = Arc::new(UpdateProcessor::new(
            Arc::clone(&registry),
            Arc::clone(&publisher) as Arc<dyn Publish>,
            config.snapshot_depth(),
        ));
        Ok(Self {
            config,
            registry,
            publisher,
            processor,
        })
    }

    /// Connect the publisher to Redis
    ///
    /// # Errors
    ///
    /// Returns a transient transport error if Redis is unreachable; the
    /// engine still works, publishing fails until a reconnect succeeds.
    pub async fn connect(&self) -> Result<()> {
        self.publisher.connect().await
    }

    /// Spawn the transport heartbeat task
    #[must_use]
    pub fn start_heartbeat(&self) -> HeartbeatHandle {
        self.publisher.start_heartbeat()
    }

    /// Shared update processor
    #[must_use]
    pub fn processor(&self) -> Arc<UpdateProcessor> {
        Arc::clone(&self.processor)
    }

    /// Shared book registry (read-only views)
    #[must_use]
    pub fn registry(&self) -> Arc<BookRegistry> {
        Arc::clone(&self.registry)
    }

    /// The Redis publisher
    #[must_use]
    pub fn publisher(&self) -> Arc<RedisPublisher> {
        Arc::clone(&self.publisher)
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_assembly() {
        let engine = TickEngine::new(Config::default()).unwrap();
        assert!(engine.registry().is_empty());
        assert!(!engine.publisher().is_connected());
        assert_eq!(engine.processor().depth(), 10);
    }
}
