// 3rd party crates
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{debug, info};

// Current module imports
use super::errors::StoreError;
use super::traits::CounterStore;

/// Redis-backed counter store.
///
/// Holds a multiplexed connection manager, so the handle is cheap to clone
/// and share across worker tasks. All failures surface as
/// [`StoreError::Connectivity`].
#[derive(Clone)]
pub struct RedisCounterStore {
    manager: ConnectionManager,
}

impl RedisCounterStore {
    /// Connects to the Redis instance at `url`
    /// (e.g. `"redis://127.0.0.1:6379"`).
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client: Client = Client::open(url)?;
        let manager: ConnectionManager = client.get_connection_manager().await?;
        info!("Connected to counter store at {}", url);
        Ok(Self { manager })
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn get_and_decrement(&self, key: &str) -> Result<(Option<i64>, i64), StoreError> {
        let mut conn = self.manager.clone();
        // GET and DECR batched as one pipelined round trip. The pipeline is
        // not a transaction: other callers may interleave between the two.
        let (before, after): (Option<i64>, i64) = redis::pipe()
            .get(key)
            .decr(key, 1)
            .query_async(&mut conn)
            .await?;
        debug!("get+decr '{}': before={:?}, after={}", key, before, after);
        Ok((before, after))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: i64,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.manager.clone();
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }
}
