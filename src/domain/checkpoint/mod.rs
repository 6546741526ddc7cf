//! Checkpoint domain
//!
//! Conversation state persisted per thread between graph executions.

mod entity;
mod store;

pub use entity::Checkpoint;
pub use store::CheckpointStore;

#[cfg(test)]
pub use store::MockCheckpointStore;
