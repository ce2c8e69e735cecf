pub mod errors;
pub mod traits;
pub mod types;

pub use errors::{RegistryError, SchedulerError};
pub use traits::RetryScheduler;
pub use types::TaskRegistry;
