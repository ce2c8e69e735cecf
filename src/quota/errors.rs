// 3rd party crates
use thiserror::Error;

/// Errors produced while parsing a rate-limit spec string.
///
/// These are fatal for the task class that carries the malformed spec:
/// the wrapper surfaces them on first invocation, before any store access,
/// and never retries them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Rate limit string is empty or missing")]
    MissingSpec,

    #[error("Invalid rate limit format '{0}'. Use 'calls/period' (e.g. '10/s')")]
    InvalidFormat(String),

    #[error("Invalid call limit '{0}'. Must be a positive integer")]
    InvalidCalls(String),

    #[error("Invalid period '{0}'. Use 's', 'm', or 'h'")]
    InvalidPeriod(String),
}
