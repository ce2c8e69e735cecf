// Standard library
use std::fmt;
use std::sync::Arc;

// 3rd party crates
use serde_json::Value;
use tokio::sync::OnceCell;

// Project imports
use crate::quota::RateLimitSpec;
use crate::runner::types::TaskRegistry;
use crate::store::CounterStore;

// Current module imports
use super::traits::TaskBody;

/// One call of a task: its positional JSON arguments, in caller order.
/// The first argument is the client id the quota is keyed on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Invocation {
    args: Vec<Value>,
}

impl Invocation {
    pub fn new(args: Vec<Value>) -> Self {
        Self { args }
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn into_args(self) -> Vec<Value> {
        self.args
    }

    /// The client id as it contributes to the bucket key: string arguments
    /// use their raw value, any other JSON scalar uses its JSON text.
    /// `None` when the invocation carries no positional arguments at all.
    pub fn client_id(&self) -> Option<String> {
        self.args.first().map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Result of one wrapped invocation.
#[derive(Debug, PartialEq)]
pub enum TaskOutcome {
    /// The body ran; this is its result.
    Completed(Value),
    /// Quota exhausted. The body did not run; the exact invocation was
    /// handed to the runner to be re-invoked after `countdown_seconds`.
    Deferred { countdown_seconds: u64 },
}

/// A task class bound to a fixed `(namespace, rate-limit string)` pair and
/// a counter store handle, created once at registration time.
///
/// The rate-limit string is parsed lazily on the first invocation and
/// cached, so the configuration source may be late-bound; a parse failure
/// is fatal and surfaces before any store access.
pub struct RateLimitedTask {
    pub(super) namespace: String,
    pub(super) name: String,
    pub(super) rate_limit: Option<String>,
    pub(super) parsed: OnceCell<RateLimitSpec>,
    pub(super) store: Arc<dyn CounterStore>,
    pub(super) body: Box<dyn TaskBody>,
}

impl fmt::Debug for RateLimitedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimitedTask")
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .field("rate_limit", &self.rate_limit)
            .finish_non_exhaustive()
    }
}

/// Builds rate-limited task definitions bound to a fixed namespace and
/// default quota, and registers them with the task registry. Holds no
/// mutable state beyond its constructor arguments.
pub struct TaskFactory {
    pub(super) namespace: String,
    pub(super) default_rate_limit: Option<String>,
    pub(super) store: Arc<dyn CounterStore>,
    pub(super) registry: Arc<TaskRegistry>,
}
