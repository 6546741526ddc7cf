//! Checkpoint store trait

use async_trait::async_trait;

use super::Checkpoint;
use crate::domain::DomainError;
use crate::domain::conversation::{ConversationState, ThreadId};

#[cfg(test)]
use mockall::automock;

/// Persists conversation state keyed by thread id
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Latest checkpoint for a thread
    async fn load_checkpoint(&self, thread_id: &ThreadId)
    -> Result<Option<Checkpoint>, DomainError>;

    /// Store `state` as the thread's newest checkpoint and return it
    async fn save(
        &self,
        thread_id: &ThreadId,
        state: &ConversationState,
    ) -> Result<Checkpoint, DomainError>;

    /// Remove a thread, returning whether it existed
    async fn delete(&self, thread_id: &ThreadId) -> Result<bool, DomainError>;

    /// Verify the backend is reachable
    async fn health_check(&self) -> Result<(), DomainError>;

    /// Latest state for a thread
    async fn load(&self, thread_id: &ThreadId) -> Result<Option<ConversationState>, DomainError> {
        Ok(self.load_checkpoint(thread_id).await?.map(|c| c.state))
    }

    /// Get the store type name
    fn store_name(&self) -> &'static str;
}
