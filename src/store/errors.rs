// 3rd party crates
use thiserror::Error;

/// Errors raised by a counter store backend.
///
/// Store failures are infrastructure failures. They propagate to the caller
/// unmodified and are never converted into a quota decision: an unreachable
/// store must never look like "quota exceeded".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Counter store unreachable: {0}")]
    Connectivity(#[from] ::redis::RedisError),

    #[error("Counter store unavailable: {0}")]
    Unavailable(String),
}
