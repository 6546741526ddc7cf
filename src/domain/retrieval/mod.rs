//! Document retrieval domain
//!
//! Passages are the unit of evidence that flows through the RAG graph: the retriever
//! produces them ungraded, the relevance grader marks them, and the generator consumes
//! the survivors.

mod passage;
mod retriever;

pub use passage::{Passage, RelevanceGrade, join_passages};
pub use retriever::DocumentRetriever;

#[cfg(test)]
pub use retriever::mock::MockDocumentRetriever;
