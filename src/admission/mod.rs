pub mod functions;
pub mod types;

pub use functions::admit;
pub use types::{Admission, BucketKey};
