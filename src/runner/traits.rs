// 3rd party crates
use async_trait::async_trait;

// Project imports
use crate::task::types::Invocation;

// Current module imports
use super::errors::SchedulerError;

/// The one primitive this crate needs from an external task runner:
/// "re-invoke this exact call after `countdown_seconds`".
///
/// A denied invocation is handed over here and then owned by the runner;
/// this crate does not track, retry or cancel it afterwards. The scheduler
/// is passed into `RateLimitedTask::invoke` explicitly, so there is no
/// process-wide runner handle.
#[async_trait]
pub trait RetryScheduler: Send + Sync {
    /// Schedules `invocation` of the task registered under `task` (the
    /// qualified `namespace:name`) to be re-invoked after
    /// `countdown_seconds`.
    async fn schedule_retry(
        &self,
        task: &str,
        invocation: Invocation,
        countdown_seconds: u64,
    ) -> Result<(), SchedulerError>;
}
