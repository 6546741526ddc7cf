//! Conversation service - supervisor routing and checkpointed turns

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use super::thread_locks::ThreadLocks;
use crate::domain::{
    Checkpoint, CheckpointStore, ConversationState, DomainError, Message, NodeExecution,
    RagGraph, Route, StateUpdate, SupervisorRouter, ThreadId, ToolsWorkflow,
};
use crate::infrastructure::observability::record_route;

/// Messages the service appends on its own behalf
#[derive(Debug, Clone)]
pub struct ConversationServiceConfig {
    /// Reply when the supervisor decides the conversation is finished
    pub finish_message: String,
    /// Reply when the tools workflow fails
    pub fallback_message: String,
}

impl Default for ConversationServiceConfig {
    fn default() -> Self {
        Self {
            finish_message: "Glad I could help. Is there anything else?".to_string(),
            fallback_message:
                "Sorry, I could not produce an answer to that question right now. Please try again."
                    .to_string(),
        }
    }
}

/// Failure reported on a turn that still produced a reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnError {
    pub kind: String,
    pub message: String,
}

/// Outcome of one user message
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub thread_id: ThreadId,
    pub route: Route,
    /// Assistant message appended by this turn
    pub reply: String,
    /// Graph nodes executed, empty when the RAG workflow did not run
    pub path: Vec<NodeExecution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TurnError>,
    /// Checkpoint version written for this turn
    pub version: u64,
}

/// Runs user messages through the supervisor and persists each thread
pub struct ConversationService {
    store: Arc<dyn CheckpointStore>,
    router: Arc<dyn SupervisorRouter>,
    graph: Arc<dyn RagGraph>,
    tools: Option<Arc<dyn ToolsWorkflow>>,
    config: ConversationServiceConfig,
    locks: ThreadLocks,
}

impl std::fmt::Debug for ConversationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationService")
            .field("store", &self.store.store_name())
            .field("tools", &self.tools.is_some())
            .finish()
    }
}

impl ConversationService {
    pub fn new(
        store: Arc<dyn CheckpointStore>,
        router: Arc<dyn SupervisorRouter>,
        graph: Arc<dyn RagGraph>,
    ) -> Self {
        Self {
            store,
            router,
            graph,
            tools: None,
            config: ConversationServiceConfig::default(),
            locks: ThreadLocks::new(),
        }
    }

    pub fn with_tools(mut self, tools: Arc<dyn ToolsWorkflow>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_config(mut self, config: ConversationServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &Arc<dyn CheckpointStore> {
        &self.store
    }

    /// Start an empty thread
    pub async fn create_thread(&self) -> Result<Checkpoint, DomainError> {
        let thread_id = ThreadId::generate();
        let checkpoint = self.store.save(&thread_id, &ConversationState::default()).await?;

        info!(thread_id = %thread_id, "Created thread");
        Ok(checkpoint)
    }

    pub async fn get_thread(&self, thread_id: &ThreadId) -> Result<Option<Checkpoint>, DomainError> {
        self.store.load_checkpoint(thread_id).await
    }

    /// Remove a thread, returning whether it existed
    pub async fn delete_thread(&self, thread_id: &ThreadId) -> Result<bool, DomainError> {
        let _guard = self.locks.acquire(thread_id).await;
        self.store.delete(thread_id).await
    }

    /// Handle one user message on `thread_id`
    ///
    /// Turns on the same thread run one at a time. Every successful call appends the user
    /// message and exactly one assistant message to the thread.
    pub async fn send_message(
        &self,
        thread_id: &ThreadId,
        content: &str,
    ) -> Result<ConversationTurn, DomainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::validation("Message content cannot be empty"));
        }

        let _guard = self.locks.acquire(thread_id).await;
        let start = Instant::now();

        let mut state = self
            .store
            .load_checkpoint(thread_id)
            .await?
            .map(|c| c.state)
            .unwrap_or_default();
        state.begin_turn(Message::user(content));

        let route = match self.router.route(&state.messages).await {
            Ok(route) => route,
            Err(e) => {
                warn!(thread_id = %thread_id, error = %e, "Supervisor failed, using RAG workflow");
                Route::RagWorkflow
            }
        };
        record_route(route.as_str());

        let (state, path, error) = self.dispatch(route, state, content).await;

        let checkpoint = self.store.save(thread_id, &state).await?;
        let reply = state
            .last_message()
            .map(|m| m.content_text().to_string())
            .unwrap_or_default();

        info!(
            thread_id = %thread_id,
            route = route.as_str(),
            version = checkpoint.version,
            failed = error.is_some(),
            execution_time_ms = start.elapsed().as_millis() as u64,
            "Turn completed"
        );

        Ok(ConversationTurn {
            thread_id: thread_id.clone(),
            route,
            reply,
            path,
            error,
            version: checkpoint.version,
        })
    }

    async fn dispatch(
        &self,
        route: Route,
        mut state: ConversationState,
        question: &str,
    ) -> (ConversationState, Vec<NodeExecution>, Option<TurnError>) {
        match (route, &self.tools) {
            (Route::Finish, _) => {
                state.apply(
                    StateUpdate::new()
                        .with_message(Message::assistant(self.config.finish_message.clone())),
                );
                (state, Vec::new(), None)
            }
            (Route::ToolsWorkflow, Some(tools)) => {
                let (reply, error) = match tools.run(question).await {
                    Ok(reply) => (reply, None),
                    Err(e) => {
                        warn!(error = %e, "Tools workflow failed, sending fallback message");
                        let error = TurnError {
                            kind: "tools_error".to_string(),
                            message: e.to_string(),
                        };
                        (self.config.fallback_message.clone(), Some(error))
                    }
                };
                state.apply(StateUpdate::new().with_message(Message::assistant(reply)));
                (state, Vec::new(), error)
            }
            (Route::ToolsWorkflow, None) | (Route::RagWorkflow, _) => {
                if route == Route::ToolsWorkflow {
                    warn!("No tools workflow configured, using RAG workflow");
                }

                let run = self.graph.run(state).await;
                let error = run.error().map(|e| TurnError {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                });
                (run.state, run.path, error)
            }
        }
    }
}
