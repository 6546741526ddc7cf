//! Redis checkpoint store

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::{Checkpoint, CheckpointStore, ConversationState, DomainError, ThreadId};

/// Configuration for the Redis checkpoint store
#[derive(Debug, Clone)]
pub struct RedisCheckpointConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Key prefix; checkpoints live under `<prefix>:<thread_id>`
    pub key_prefix: String,
    /// Expiry refreshed on every save
    pub ttl: Option<Duration>,
}

impl Default for RedisCheckpointConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: "rag:checkpoint".to_string(),
            ttl: None,
        }
    }
}

impl RedisCheckpointConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Stores checkpoints as JSON strings in Redis
#[derive(Clone)]
pub struct RedisCheckpointStore {
    connection: ConnectionManager,
    config: RedisCheckpointConfig,
}

impl fmt::Debug for RedisCheckpointStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCheckpointStore")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCheckpointStore {
    pub async fn new(config: RedisCheckpointConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::storage(format!("Failed to create Redis client: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    fn key(&self, thread_id: &ThreadId) -> String {
        checkpoint_key(&self.config.key_prefix, thread_id)
    }
}

fn checkpoint_key(prefix: &str, thread_id: &ThreadId) -> String {
    format!("{}:{}", prefix, thread_id)
}

#[async_trait]
impl CheckpointStore for RedisCheckpointStore {
    async fn load_checkpoint(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Option<Checkpoint>, DomainError> {
        let mut conn = self.connection.clone();

        let raw: Option<String> = conn.get(self.key(thread_id)).await.map_err(|e| {
            DomainError::storage(format!("Failed to load thread '{}': {}", thread_id, e))
        })?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| {
                DomainError::internal(format!("Corrupt checkpoint for '{}': {}", thread_id, e))
            })
        })
        .transpose()
    }

    async fn save(
        &self,
        thread_id: &ThreadId,
        state: &ConversationState,
    ) -> Result<Checkpoint, DomainError> {
        let previous = self.load_checkpoint(thread_id).await?;
        let checkpoint = Checkpoint::next(previous.as_ref(), thread_id.clone(), state.clone());

        let json = serde_json::to_string(&checkpoint)
            .map_err(|e| DomainError::internal(format!("Failed to serialize checkpoint: {}", e)))?;

        let key = self.key(thread_id);
        let mut conn = self.connection.clone();

        let result: Result<(), _> = match self.config.ttl {
            Some(ttl) => conn.set_ex(&key, json, ttl.as_secs().max(1)).await,
            None => conn.set(&key, json).await,
        };

        result.map_err(|e| {
            DomainError::storage(format!("Failed to save thread '{}': {}", thread_id, e))
        })?;

        Ok(checkpoint)
    }

    async fn delete(&self, thread_id: &ThreadId) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let deleted: i32 = conn.del(self.key(thread_id)).await.map_err(|e| {
            DomainError::storage(format!("Failed to delete thread '{}': {}", thread_id, e))
        })?;

        Ok(deleted > 0)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| DomainError::storage(format!("Redis ping failed: {}", e)))?;

        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "redis"
    }
}
