//! LLM-backed supervisor routing

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::completion::{CompletionService, PromptVariables, extract_json_object};
use crate::domain::supervisor::{Route, SupervisorRouter};
use crate::domain::{DomainError, LlmProvider, Message};
use crate::infrastructure::llm::LlmCompletion;
use crate::infrastructure::prompts;

const WORKERS: [Route; 2] = [Route::RagWorkflow, Route::ToolsWorkflow];

/// Asks the model which worker should act next
#[derive(Debug, Clone)]
pub struct LlmSupervisorRouter {
    completion: Arc<dyn CompletionService>,
}

#[derive(Debug, Deserialize)]
struct RouterReply {
    next: String,
}

impl LlmSupervisorRouter {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub fn from_provider(
        provider: Arc<dyn LlmProvider>,
        model: &str,
        temperature: f32,
    ) -> Result<Self, DomainError> {
        let completion = LlmCompletion::new(provider, model, prompts::template(prompts::SUPERVISOR)?)
            .with_temperature(temperature)
            .json();

        Ok(Self::new(Arc::new(completion)))
    }

    fn variables(messages: &[Message]) -> PromptVariables {
        let join = |routes: &[Route]| {
            routes
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let conversation = messages
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content_text()))
            .collect::<Vec<_>>()
            .join("\n");

        let mut variables = PromptVariables::new();
        variables.insert("team_members".to_string(), join(&WORKERS));
        variables.insert("options".to_string(), join(&Route::ALL));
        variables.insert("conversation".to_string(), conversation);
        variables
    }
}

/// Parse `{"next": "<worker>"}`; a bare worker name is accepted as well
pub(crate) fn parse_route(raw: &str) -> Result<Route, DomainError> {
    match extract_json_object(raw) {
        Some(json) => {
            let reply: RouterReply = serde_json::from_str(json).map_err(|e| {
                DomainError::malformed_router_output(format!("invalid reply {:?}: {}", raw, e))
            })?;
            reply.next.parse()
        }
        None => raw.parse(),
    }
}

#[async_trait]
impl SupervisorRouter for LlmSupervisorRouter {
    async fn route(&self, messages: &[Message]) -> Result<Route, DomainError> {
        let raw = self.completion.complete(Self::variables(messages)).await?;

        match parse_route(&raw) {
            Ok(route) => {
                debug!(route = route.as_str(), "Supervisor routed message");
                Ok(route)
            }
            Err(e) => {
                warn!(error = %e, "Unparseable supervisor output");
                Err(e)
            }
        }
    }
}
