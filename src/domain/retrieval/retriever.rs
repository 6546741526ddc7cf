//! Document retriever trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::Passage;
use crate::domain::DomainError;

/// Looks up candidate passages for a query in an external index
///
/// An empty result is a valid answer and must not be reported as an error.
#[async_trait]
pub trait DocumentRetriever: Send + Sync + Debug {
    /// Return up to `top_k` passages, most relevant first
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, DomainError>;

    /// Get the retriever type name
    fn retriever_name(&self) -> &'static str;
}
