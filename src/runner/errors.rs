// 3rd party crates
use thiserror::Error;

/// Errors raised while registering task definitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),
}

/// Errors raised by the external task runner's retry primitive.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Failed to schedule retry for task '{task}': {message}")]
    ScheduleFailed { task: String, message: String },
}
