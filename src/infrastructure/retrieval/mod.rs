//! Document retriever implementations

mod corpus;
mod embedding;
mod in_memory;

pub use corpus::{CorpusEntry, load_corpus};
pub use embedding::EmbeddingRetriever;
pub use in_memory::InMemoryRetriever;
