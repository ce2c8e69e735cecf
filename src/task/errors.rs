// 3rd party crates
use thiserror::Error;

// Project imports
use crate::quota::ConfigError;
use crate::runner::errors::SchedulerError;
use crate::store::StoreError;

// Current module imports
use super::traits::BodyError;

/// Errors surfaced by one task invocation.
///
/// Quota exhaustion is deliberately absent from this list: a denied call is
/// not an error, it comes back as [`super::types::TaskOutcome::Deferred`].
#[derive(Debug, Error)]
pub enum TaskError {
    /// The task's rate-limit string is missing or malformed. Fatal for the
    /// task class, surfaced before any store access, never retried.
    #[error("Rate limit configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The invocation carried no positional arguments, so there is no
    /// client id to key the quota on. Fatal for this invocation, never
    /// retried and never rate-limited.
    #[error("Task '{0}' was called without a client id as its first argument")]
    MissingClientId(String),

    /// The counter store is unreachable or failed. Propagated unmodified;
    /// infrastructure failure is never reported as quota exhaustion.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The external runner refused the deferred re-invocation.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// The task body itself failed; its error passes through unchanged.
    #[error("Task body failed: {0}")]
    Body(#[source] BodyError),
}
