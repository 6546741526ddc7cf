//! In-memory checkpoint store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Checkpoint, CheckpointStore, ConversationState, DomainError, ThreadId};

/// Keeps checkpoints for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryCheckpointStore {
    checkpoints: RwLock<HashMap<ThreadId, Checkpoint>>,
}

impl InMemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.checkpoints.read().await.len()
    }
}

#[async_trait]
impl CheckpointStore for InMemoryCheckpointStore {
    async fn load_checkpoint(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Option<Checkpoint>, DomainError> {
        Ok(self.checkpoints.read().await.get(thread_id).cloned())
    }

    async fn save(
        &self,
        thread_id: &ThreadId,
        state: &ConversationState,
    ) -> Result<Checkpoint, DomainError> {
        let mut checkpoints = self.checkpoints.write().await;

        let checkpoint = Checkpoint::next(checkpoints.get(thread_id), thread_id.clone(), state.clone());
        checkpoints.insert(thread_id.clone(), checkpoint.clone());

        Ok(checkpoint)
    }

    async fn delete(&self, thread_id: &ThreadId) -> Result<bool, DomainError> {
        Ok(self.checkpoints.write().await.remove(thread_id).is_some())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Message;

    #[tokio::test]
    async fn test_save_and_load() {
        let store = InMemoryCheckpointStore::new();
        let id = ThreadId::new("thread-1").unwrap();
        let state = ConversationState::from_user_message("hello");

        let checkpoint = store.save(&id, &state).await.unwrap();
        assert_eq!(checkpoint.version, 1);

        let loaded = store.load(&id).await.unwrap();
        assert_eq!(loaded, Some(state));
    }

    #[tokio::test]
    async fn test_versions_increment() {
        let store = InMemoryCheckpointStore::new();
        let id = ThreadId::new("thread-1").unwrap();
        let mut state = ConversationState::from_user_message("hello");

        store.save(&id, &state).await.unwrap();
        state.begin_turn(Message::user("again"));
        let second = store.save(&id, &state).await.unwrap();

        assert_eq!(second.version, 2);
        let loaded = store.load_checkpoint(&id).await.unwrap().unwrap();
        assert_eq!(loaded.version, 2);
        assert_eq!(loaded.state.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_threads_are_isolated() {
        let store = InMemoryCheckpointStore::new();
        let a = ThreadId::new("a").unwrap();
        let b = ThreadId::new("b").unwrap();

        store
            .save(&a, &ConversationState::from_user_message("for a"))
            .await
            .unwrap();

        assert!(store.load(&b).await.unwrap().is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryCheckpointStore::new();
        let id = ThreadId::new("gone").unwrap();
        store.save(&id, &ConversationState::default()).await.unwrap();

        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
        assert!(store.load(&id).await.unwrap().is_none());
    }
}
