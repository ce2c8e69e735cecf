// Standard library
use std::fmt;

/// Composite key identifying one quota window in the counter store:
/// `namespace:task_identity:client_id`.
///
/// Namespacing keeps unrelated task families and clients on independent
/// keys, so they never contend on the same window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey(String);

impl BucketKey {
    pub fn new(namespace: &str, task: &str, client_id: &str) -> Self {
        Self(format!("{}:{}:{}", namespace, task, client_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one admission check.
///
/// `Denied` is a control-flow signal, not an error: the caller is expected
/// to re-invoke after `retry_after_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Denied { retry_after_seconds: u64 },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }
}
