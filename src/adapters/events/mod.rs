//! Event channel adapters.
//!
//! Adapters implement the event publishing port for different environments:
//!
//! - `InMemoryEventPublisher` - In-process capture for development and tests
//! - `RedisEventPublisher` - Redis pub/sub for production

mod in_memory;
mod redis;

pub use in_memory::InMemoryEventPublisher;
pub use self::redis::RedisEventPublisher;
