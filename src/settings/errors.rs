// 3rd party crates
use thiserror::Error;

// Project imports
use crate::quota::ConfigError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),

    #[error("Counter store URL must not be empty")]
    MissingStoreUrl,

    #[error("Invalid rate limit for '{scope}': {source}")]
    InvalidRateLimit {
        scope: String,
        #[source]
        source: ConfigError,
    },
}
