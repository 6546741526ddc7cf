//! LLM-backed answer generation and query regeneration

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::completion::{CompletionService, PromptVariables};
use crate::domain::generation::{AnswerGenerator, QueryRegenerator};
use crate::domain::retrieval::{Passage, join_passages};
use crate::domain::{DomainError, LlmProvider};
use crate::infrastructure::llm::LlmCompletion;
use crate::infrastructure::prompts;

fn question_and_documents(question: &str, documents: &[Passage]) -> PromptVariables {
    let mut variables = PromptVariables::new();
    variables.insert("question".to_string(), question.to_string());
    variables.insert("documents".to_string(), join_passages(documents));
    variables
}

/// Answers a question from the supplied passages
#[derive(Debug, Clone)]
pub struct LlmAnswerGenerator {
    completion: Arc<dyn CompletionService>,
}

impl LlmAnswerGenerator {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub fn from_provider(
        provider: Arc<dyn LlmProvider>,
        model: &str,
        temperature: f32,
    ) -> Result<Self, DomainError> {
        let completion = LlmCompletion::new(
            provider,
            model,
            prompts::template(prompts::ANSWER_GENERATOR)?,
        )
        .with_temperature(temperature);

        Ok(Self::new(Arc::new(completion)))
    }
}

#[async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn generate(
        &self,
        question: &str,
        documents: &[Passage],
    ) -> Result<String, DomainError> {
        self.completion
            .complete(question_and_documents(question, documents))
            .await
    }
}

/// Tells the user the documents could not answer and asks for clarification
#[derive(Debug, Clone)]
pub struct LlmQueryRegenerator {
    completion: Arc<dyn CompletionService>,
}

impl LlmQueryRegenerator {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub fn from_provider(
        provider: Arc<dyn LlmProvider>,
        model: &str,
        temperature: f32,
    ) -> Result<Self, DomainError> {
        let completion = LlmCompletion::new(
            provider,
            model,
            prompts::template(prompts::QUERY_REGENERATOR)?,
        )
        .with_temperature(temperature);

        Ok(Self::new(Arc::new(completion)))
    }
}

#[async_trait]
impl QueryRegenerator for LlmQueryRegenerator {
    async fn regenerate(
        &self,
        question: &str,
        documents: &[Passage],
    ) -> Result<String, DomainError> {
        self.completion
            .complete(question_and_documents(question, documents))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::completion::MockCompletionService;
    use crate::domain::llm::MockLlmProvider;

    fn passages() -> Vec<Passage> {
        vec![
            Passage::new("Agents use tools.", "agents.md"),
            Passage::new("Planning decomposes tasks.", "planning.md"),
        ]
    }

    #[tokio::test]
    async fn test_generator_joins_documents() {
        let completion = Arc::new(MockCompletionService::new().with_reply("Agents plan and use tools."));
        let generator = LlmAnswerGenerator::new(completion.clone());

        let answer = generator
            .generate("What do agents do?", &passages())
            .await
            .unwrap();
        assert_eq!(answer, "Agents plan and use tools.");

        let call = &completion.calls()[0];
        assert_eq!(call["question"], "What do agents do?");
        assert_eq!(call["documents"], "Agents use tools.\n\nPlanning decomposes tasks.");
    }

    #[tokio::test]
    async fn test_regenerator_with_no_documents() {
        let completion = Arc::new(MockCompletionService::new().with_reply("Could you clarify?"));
        let regenerator = LlmQueryRegenerator::new(completion.clone());

        let reply = regenerator.regenerate("huh?", &[]).await.unwrap();
        assert_eq!(reply, "Could you clarify?");
        assert_eq!(completion.calls()[0]["documents"], "");
    }

    #[tokio::test]
    async fn test_from_provider_renders_builtin_template() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply("answer"));
        let generator = LlmAnswerGenerator::from_provider(provider.clone(), "gen", 0.0).unwrap();

        generator.generate("Q?", &passages()).await.unwrap();

        let prompt = provider.requests()[0].messages[0].content_text().to_string();
        assert!(prompt.contains("Question: Q?"));
        assert!(prompt.contains("Planning decomposes tasks."));
    }
}
