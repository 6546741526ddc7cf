//! Grading service trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::Verdict;
use crate::domain::DomainError;

/// Binary-classification calls used by the RAG graph
#[async_trait]
pub trait GradingService: Send + Sync + Debug {
    /// Is `document` relevant to `question`?
    async fn grade_relevance(&self, question: &str, document: &str)
    -> Result<Verdict, DomainError>;

    /// Is `generation` supported by `documents`?
    async fn grade_groundedness(
        &self,
        documents: &str,
        generation: &str,
    ) -> Result<Verdict, DomainError>;

    /// Does `generation` resolve `question`?
    async fn grade_usefulness(&self, question: &str, generation: &str)
    -> Result<Verdict, DomainError>;
}
