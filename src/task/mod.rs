pub mod errors;
pub mod impls;
pub mod traits;
pub mod types;

pub use errors::TaskError;
pub use traits::{BodyError, TaskBody};
pub use types::{Invocation, RateLimitedTask, TaskFactory, TaskOutcome};
