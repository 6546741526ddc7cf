//! RAG graph trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::GraphRun;
use crate::domain::conversation::ConversationState;

/// Runs the RAG control graph over a conversation state
///
/// Never fails outright: fatal errors are reported through `GraphRun::outcome` and the
/// returned state still carries exactly one new assistant message.
#[async_trait]
pub trait RagGraph: Send + Sync + Debug {
    async fn run(&self, state: ConversationState) -> GraphRun;
}
