// 3rd party crates
use async_trait::async_trait;

// Current module imports
use super::errors::StoreError;

/// Shared counter store backing the admission protocol.
///
/// Implementations expose the handful of operations the protocol needs over
/// a keyspace of integer counters with per-key expiry. The store handle is
/// passed into wrappers explicitly at construction, so tests can substitute
/// an in-process implementation without global state.
///
/// # Semantics implementations must preserve
///
/// - `get_and_decrement` issues both operations as a single round trip and
///   returns them together, but the pair is **not** atomic against other
///   callers issuing the same pair.
/// - Decrementing an absent key creates it at `-1` with no expiry.
/// - Incrementing an absent key creates it at `1` with no expiry.
/// - An expired key behaves exactly like an absent key.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Reads the current value of `key` and decrements it by one, batched
    /// into one round trip.
    ///
    /// Returns `(value before the decrement, value after the decrement)`;
    /// the first element is `None` when the key did not exist.
    async fn get_and_decrement(&self, key: &str) -> Result<(Option<i64>, i64), StoreError>;

    /// Sets `key` to `value` with a time-to-live of `ttl_seconds`,
    /// overwriting any previous value and expiry.
    async fn set_with_expiry(&self, key: &str, value: i64, ttl_seconds: u64)
        -> Result<(), StoreError>;

    /// Increments `key` by one and returns the new value.
    async fn increment(&self, key: &str) -> Result<i64, StoreError>;
}
