// 3rd party crates
use tracing::debug;

// Project imports
use crate::store::{CounterStore, StoreError};

// Current module imports
use super::types::{Admission, BucketKey};

/// Token-bucket admission check against the shared counter store.
///
/// Issues GET and DECR on the bucket key as one batched round trip, then:
///
/// - key absent before the decrement: the window is fresh, so the key is
///   initialized to `limit - 1` with a TTL of `period_seconds` and the call
///   is admitted;
/// - decremented value >= 0: admitted (exactly 0 still admits, it consumed
///   the last token);
/// - decremented value < 0: the over-decrement is compensated with an
///   increment and the call is denied with
///   `retry_after_seconds = period_seconds`.
///
/// Known race, kept on purpose: the "absent, initialize" branch is not
/// atomic against other callers. Two callers that both observe an absent
/// key will both initialize the window, transiently admitting more than
/// `limit` calls. Bounding that window tighter (SET NX plus an atomic
/// decrement-and-read) would change observable behavior under contention,
/// so it is not done here.
///
/// Store failures propagate unmodified; they are never mapped to a denial.
pub async fn admit(
    store: &dyn CounterStore,
    key: &BucketKey,
    limit: u32,
    period_seconds: u64,
) -> Result<Admission, StoreError> {
    let (before, after) = store.get_and_decrement(key.as_str()).await?;

    if before.is_none() {
        // Fresh window: this call consumes the first token.
        let tokens_left: i64 = i64::from(limit) - 1;
        store
            .set_with_expiry(key.as_str(), tokens_left, period_seconds)
            .await?;
        debug!(
            "Opened window for '{}': {} tokens left, ttl {}s",
            key, tokens_left, period_seconds
        );
        return Ok(Admission::Admitted);
    }

    if after >= 0 {
        debug!("Admitted '{}': {} tokens left", key, after);
        return Ok(Admission::Admitted);
    }

    // Undo the over-decrement before reporting exhaustion.
    store.increment(key.as_str()).await?;
    debug!("Denied '{}': retry in {}s", key, period_seconds);
    Ok(Admission::Denied {
        retry_after_seconds: period_seconds,
    })
}
