use std::fmt::Debug;

use async_trait::async_trait;

use super::Route;
use crate::domain::DomainError;
use crate::domain::llm::Message;

/// Decides which worker acts next given the conversation so far
#[async_trait]
pub trait SupervisorRouter: Send + Sync + Debug {
    async fn route(&self, messages: &[Message]) -> Result<Route, DomainError>;
}

/// Always sends messages to the same worker
#[derive(Debug, Clone, Copy)]
pub struct StaticRouter(pub Route);

#[async_trait]
impl SupervisorRouter for StaticRouter {
    async fn route(&self, _messages: &[Message]) -> Result<Route, DomainError> {
        Ok(self.0)
    }
}
