use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// External tool-invocation workflow reached through the supervisor
#[async_trait]
pub trait ToolsWorkflow: Send + Sync + Debug {
    /// Answer `question` using tools
    async fn run(&self, question: &str) -> Result<String, DomainError>;
}
