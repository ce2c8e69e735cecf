// Standard library
use std::collections::HashMap;

// 3rd party crates
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

// Current module imports
use super::errors::StoreError;
use super::traits::CounterStore;

#[derive(Debug, Clone)]
struct Entry {
    value: i64,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// In-process counter store with the same observable semantics as the
/// Redis backend: decrementing an absent key creates it at -1 with no
/// expiry, incrementing an absent key creates it at 1, and expired keys
/// behave like absent keys.
///
/// Intended for local runs and tests. Expiry is checked on access against
/// `tokio::time::Instant`, so paused-time tests can drive window resets.
#[derive(Default)]
pub struct MemoryCounterStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `key`, or `None` if absent or expired.
    /// Test and inspection helper, not part of the store contract.
    pub async fn value_of(&self, key: &str) -> Option<i64> {
        let mut entries = self.entries.lock().await;
        Self::purge_expired(&mut entries, key);
        entries.get(key).map(|entry| entry.value)
    }

    fn purge_expired(entries: &mut HashMap<String, Entry>, key: &str) {
        let now = Instant::now();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn get_and_decrement(&self, key: &str) -> Result<(Option<i64>, i64), StoreError> {
        let mut entries = self.entries.lock().await;
        Self::purge_expired(&mut entries, key);

        let before: Option<i64> = entries.get(key).map(|entry| entry.value);
        let entry = entries.entry(key.to_string()).or_insert(Entry {
            value: 0,
            expires_at: None,
        });
        entry.value -= 1;
        Ok((before, entry.value))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: i64,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Some(Instant::now() + Duration::from_secs(ttl_seconds)),
            },
        );
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        let mut entries = self.entries.lock().await;
        Self::purge_expired(&mut entries, key);

        let entry = entries.entry(key.to_string()).or_insert(Entry {
            value: 0,
            expires_at: None,
        });
        entry.value += 1;
        Ok(entry.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn decrement_creates_absent_key_at_minus_one() {
        let store = MemoryCounterStore::new();
        let (before, after) = store.get_and_decrement("k").await.unwrap();
        assert_eq!(before, None);
        assert_eq!(after, -1);
        assert_eq!(store.value_of("k").await, Some(-1));
    }

    #[tokio::test]
    async fn increment_creates_absent_key_at_one() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.increment("k").await.unwrap(), 1);
        assert_eq!(store.increment("k").await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_key_behaves_like_absent() {
        let store = MemoryCounterStore::new();
        store.set_with_expiry("k", 5, 2).await.unwrap();
        assert_eq!(store.value_of("k").await, Some(5));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(store.value_of("k").await, None);

        let (before, after) = store.get_and_decrement("k").await.unwrap();
        assert_eq!(before, None);
        assert_eq!(after, -1);
    }

    #[tokio::test]
    async fn set_with_expiry_overwrites_value_and_ttl() {
        let store = MemoryCounterStore::new();
        store.get_and_decrement("k").await.unwrap();
        store.set_with_expiry("k", 9, 10).await.unwrap();
        assert_eq!(store.value_of("k").await, Some(9));
    }
}
