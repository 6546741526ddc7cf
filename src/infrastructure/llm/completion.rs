//! Prompt completion over a chat provider

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::completion::{CompletionService, PromptVariables};
use crate::domain::{DomainError, LlmProvider, LlmRequest, LlmResponseFormat, PromptTemplate};

/// Renders a template and sends it as a single chat request
#[derive(Debug, Clone)]
pub struct LlmCompletion {
    provider: Arc<dyn LlmProvider>,
    model: String,
    system: Option<String>,
    template: PromptTemplate,
    temperature: Option<f32>,
    response_format: LlmResponseFormat,
}

impl LlmCompletion {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>, template: PromptTemplate) -> Self {
        Self {
            provider,
            model: model.into(),
            system: None,
            template,
            temperature: None,
            response_format: LlmResponseFormat::Text,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Ask the provider for a JSON object reply
    pub fn json(mut self) -> Self {
        self.response_format = LlmResponseFormat::JsonObject;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionService for LlmCompletion {
    async fn complete(&self, variables: PromptVariables) -> Result<String, DomainError> {
        let prompt = self.template.render(&variables)?;

        let mut builder = LlmRequest::builder().response_format(self.response_format);
        if let Some(ref system) = self.system {
            builder = builder.system(system.clone());
        }
        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }
        let request = builder.user(prompt).build();

        debug!(
            model = %self.model,
            provider = self.provider.provider_name(),
            "Sending completion request"
        );

        let response = self.provider.chat(&self.model, request).await?;

        response.content().map(str::to_string).ok_or_else(|| {
            DomainError::provider(self.provider.provider_name(), "Empty completion returned")
        })
    }
}
