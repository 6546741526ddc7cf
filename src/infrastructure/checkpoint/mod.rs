//! Checkpoint store implementations

mod factory;
mod in_memory;
mod redis;

pub use factory::create_checkpoint_store;
pub use in_memory::InMemoryCheckpointStore;
pub use redis::{RedisCheckpointConfig, RedisCheckpointStore};
