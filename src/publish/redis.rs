//! Redis pub/sub publisher with a heartbeat/reconnect loop.
//!
//! Every book mutation ends in a `PUBLISH` on `orderbook:{symbol}` or
//! `trades:{symbol}`. Delivery is best-effort: a failed publish marks the
//! connection down and the heartbeat task re-establishes it on its own
//! schedule, while book state keeps advancing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use redis::aio::MultiplexedConnection;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::Result;

use super::Publish;

/// Publisher over a multiplexed async Redis connection.
///
/// The connection handle is cheap to clone; `publish` clones it out of the
/// mutex so no lock is held across transport I/O. Construction does not
/// connect - call [`connect`](RedisPublisher::connect) once and let the
/// heartbeat keep the link alive afterwards.
pub struct RedisPublisher {
    client: redis::Client,
    connection: Mutex<Option<MultiplexedConnection>>,
    connected: AtomicBool,
    config: Config,
}

impl std::fmt::Debug for RedisPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPublisher")
            .field("host", &self.config.redis_host())
            .field("port", &self.config.redis_port())
            .field("connected", &self.connected)
            .finish()
    }
}

impl RedisPublisher {
    /// Create a publisher for the configured Redis endpoint
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the composed Redis URL is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        let client = redis::Client::open(config.redis_url())
            .map_err(|e| Error::Config(format!("invalid Redis URL: {e}")))?;
        Ok(Self {
            client,
            connection: Mutex::new(None),
            connected: AtomicBool::new(false),
            config: config.clone(),
        })
    }

    /// Establish the connection
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if Redis is unreachable; the publisher
    /// stays usable and a later `connect` may succeed.
    pub async fn connect(&self) -> Result<()> {
        match self.client.get_multiplexed_tokio_connection().await {
            Ok(conn) => {
                *self.connection.lock() = Some(conn);
                self.connected.store(true, Ordering::Release);
                info!(
                    host = self.config.redis_host(),
                    port = self.config.redis_port(),
                    "connected to Redis"
                );
                Ok(())
            }
            Err(e) => {
                self.connected.store(false, Ordering::Release);
                Err(Error::Transport(e))
            }
        }
    }

    /// Drop the connection and mark the publisher down
    pub fn disconnect(&self) {
        *self.connection.lock() = None;
        self.connected.store(false, Ordering::Release);
        info!("disconnected from Redis");
    }

    fn current_connection(&self) -> Result<MultiplexedConnection> {
        self.connection.lock().clone().ok_or(Error::NotConnected)
    }

    /// Liveness probe (`PING`)
    ///
    /// # Errors
    ///
    /// Returns a transient error if there is no connection or the server
    /// does not answer `PONG`.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.current_connection()?;
        let reply: String = match redis::cmd("PING").query_async(&mut conn).await {
            Ok(reply) => reply,
            Err(e) => {
                self.connected.store(false, Ordering::Release);
                return Err(Error::Transport(e));
            }
        };
        if reply == "PONG" {
            Ok(())
        } else {
            self.connected.store(false, Ordering::Release);
            Err(Error::NotConnected)
        }
    }

    /// Spawn the heartbeat task
    ///
    /// Pings every `heartbeat_interval`; on a failed ping the connection is
    /// marked down and a reconnect is attempted after `reconnect_delay`
    /// (flat, no backoff growth). The returned handle must be
    /// [`stop`](HeartbeatHandle::stop)ped before tearing the process down so
    /// the task never outlives the transport.
    #[must_use]
    pub fn start_heartbeat(self: &Arc<Self>) -> HeartbeatHandle {
        let publisher = Arc::clone(self);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let interval = publisher.config.heartbeat_interval();
        let retry_delay = publisher.config.reconnect_delay();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        if publisher.ping().await.is_ok() {
                            continue;
                        }
                        warn!("Redis heartbeat failed, reconnecting");
                        tokio::select! {
                            _ = shutdown_rx.changed() => break,
                            _ = tokio::time::sleep(retry_delay) => {}
                        }
                        match publisher.connect().await {
                            Ok(()) => info!("Redis reconnected"),
                            Err(e) => warn!(error = %e, "Redis reconnect failed"),
                        }
                    }
                }
            }
        });

        HeartbeatHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

#[async_trait]
impl Publish for RedisPublisher {
    async fn publish(&self, channel: &str, payload: &str) -> Result<u64> {
        let mut conn = self.current_connection()?;
        let result = redis::cmd("PUBLISH")
            .arg(channel)
            .arg(payload)
            .query_async(&mut conn)
            .await;
        let subscribers: u64 = match result {
            Ok(count) => count,
            Err(e) => {
                self.connected.store(false, Ordering::Release);
                return Err(Error::Transport(e));
            }
        };
        if subscribers > 0 {
            debug!(channel, subscribers, "published");
        }
        Ok(subscribers)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

/// Handle to a running heartbeat task.
///
/// Prefer [`stop`](HeartbeatHandle::stop) at shutdown: it waits for the
/// task to finish. Dropping the handle signals the task too but does not
/// wait for it.
#[derive(Debug)]
pub struct HeartbeatHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl HeartbeatHandle {
    /// Signal the heartbeat to stop and wait for the task to finish
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_disconnected() {
        let publisher = RedisPublisher::new(&Config::default()).unwrap();
        assert!(!publisher.is_connected());
    }

    #[tokio::test]
    async fn test_publish_without_connection_fails() {
        let publisher = RedisPublisher::new(&Config::default()).unwrap();
        let result = publisher.publish("orderbook:NIFTY", "{}").await;
        assert!(matches!(result, Err(Error::NotConnected)));
    }

    #[tokio::test]
    async fn test_heartbeat_stops_cleanly() {
        let publisher = Arc::new(RedisPublisher::new(&Config::default()).unwrap());
        let handle = publisher.start_heartbeat();
        // Stop must return even though no Redis is reachable
        handle.stop().await;
    }
}
