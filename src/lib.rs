//! Distributed admission control for asynchronous background tasks.
//!
//! Gates task execution against a per-client quota held in a shared
//! counter store, so many worker processes across many machines enforce
//! one budget. Quota exhaustion is not an error: a denied invocation is
//! handed back to the external task runner to be re-invoked after the
//! quota window, while store failures and contract violations surface as
//! real errors.
//!
//! Pieces, leaves first:
//! - [`quota`]: parses `"N/s|m|h"` strings into a [`quota::RateLimitSpec`].
//! - [`store`]: the shared counter store seam, with Redis and in-memory
//!   backends.
//! - [`admission`]: the token-bucket check/decrement/compensate protocol.
//! - [`task`]: the per-invocation wrapper and the factory that binds a
//!   namespace and quota to a unit of work.
//! - [`runner`]: the seam to the external task runner (retry scheduling,
//!   task registry).
//! - [`settings`]: file/environment configuration of store URL and quotas.

// Project modules
pub mod admission;
pub mod quota;
pub mod runner;
pub mod settings;
pub mod store;
pub mod task;

// Project re-exports
pub use admission::{admit, Admission, BucketKey};
pub use quota::{ConfigError, RateLimitSpec};
pub use runner::{RegistryError, RetryScheduler, SchedulerError, TaskRegistry};
pub use settings::{ConfigManager, Settings};
pub use store::{CounterStore, MemoryCounterStore, RedisCounterStore, StoreError};
pub use task::{Invocation, RateLimitedTask, TaskBody, TaskError, TaskFactory, TaskOutcome};
