//! Publish boundary: the seam between the book engine and the transport.
//!
//! The engine only needs "publish this payload on this channel, tell me if
//! it was delivered". [`Publish`] captures exactly that, so tests can swap
//! in an in-memory transport and the production code can use
//! [`RedisPublisher`].

pub mod redis;

pub use self::redis::{HeartbeatHandle, RedisPublisher};

use async_trait::async_trait;

use crate::Result;

/// Fire-and-forget delivery of a payload on a named channel.
///
/// Implementations must never block on retries inside `publish`; recovery
/// belongs to the transport's own liveness loop. The returned subscriber
/// count is observability-only - zero subscribers is a successful delivery.
#[async_trait]
pub trait Publish: Send + Sync {
    /// Attempt delivery; returns the number of subscribers that received
    /// the payload
    ///
    /// # Errors
    ///
    /// Returns a transient error when the transport is down or the send
    /// fails. Callers log and move on; the transport reconnects on its own
    /// schedule.
    async fn publish(&self, channel: &str, payload: &str) -> Result<u64>;

    /// Whether the transport currently holds a live connection
    fn is_connected(&self) -> bool;
}
