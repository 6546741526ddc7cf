use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::retrieval::Passage;

/// Produces an answer to `question` conditioned on `documents`
#[async_trait]
pub trait AnswerGenerator: Send + Sync + Debug {
    async fn generate(&self, question: &str, documents: &[Passage])
    -> Result<String, DomainError>;
}

/// Produces a clarifying or fallback response when the evidence cannot answer the question
#[async_trait]
pub trait QueryRegenerator: Send + Sync + Debug {
    async fn regenerate(
        &self,
        question: &str,
        documents: &[Passage],
    ) -> Result<String, DomainError>;
}
