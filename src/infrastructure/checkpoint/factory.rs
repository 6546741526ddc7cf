use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::{InMemoryCheckpointStore, RedisCheckpointConfig, RedisCheckpointStore};
use crate::config::{CheckpointBackend, CheckpointSettings};
use crate::domain::{CheckpointStore, DomainError};

/// Build the checkpoint store selected in configuration
pub async fn create_checkpoint_store(
    settings: &CheckpointSettings,
) -> Result<Arc<dyn CheckpointStore>, DomainError> {
    match settings.backend {
        CheckpointBackend::Memory => {
            info!("Using in-memory checkpoint store");
            Ok(Arc::new(InMemoryCheckpointStore::new()))
        }
        CheckpointBackend::Redis => {
            let mut config = RedisCheckpointConfig::new(&settings.redis_url)
                .with_key_prefix(&settings.key_prefix);
            if settings.ttl_secs > 0 {
                config = config.with_ttl(Duration::from_secs(settings.ttl_secs));
            }

            info!(prefix = %settings.key_prefix, "Using Redis checkpoint store");
            Ok(Arc::new(RedisCheckpointStore::new(config).await?))
        }
    }
}
