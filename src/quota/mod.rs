pub mod errors;
pub mod impls;
pub mod types;

pub use errors::ConfigError;
pub use types::RateLimitSpec;
