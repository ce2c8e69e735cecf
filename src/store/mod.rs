pub mod errors;
pub mod memory;
pub mod redis;
pub mod traits;

pub use errors::StoreError;
pub use memory::MemoryCounterStore;
pub use self::redis::RedisCounterStore;
pub use traits::CounterStore;
