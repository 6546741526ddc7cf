//! Embedding similarity retriever

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::CorpusEntry;
use crate::domain::{DocumentRetriever, DomainError, EmbeddingProvider, Passage, cosine_similarity};

const EMBEDDING_BATCH_SIZE: usize = 64;

/// Ranks passages by cosine similarity between query and passage embeddings
///
/// The corpus is embedded once when the retriever is built.
#[derive(Debug)]
pub struct EmbeddingRetriever {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    threshold: f32,
    entries: Vec<(CorpusEntry, Vec<f32>)>,
}

impl EmbeddingRetriever {
    pub async fn build(
        provider: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
        corpus: Vec<CorpusEntry>,
        threshold: f32,
    ) -> Result<Self, DomainError> {
        let model = model.into();
        let mut entries = Vec::with_capacity(corpus.len());

        for batch in corpus.chunks(EMBEDDING_BATCH_SIZE) {
            let texts = batch.iter().map(|e| e.text.clone()).collect();
            let vectors = provider.embed(&model, texts).await?;

            if vectors.len() != batch.len() {
                return Err(DomainError::provider(
                    provider.provider_name(),
                    "Embedding count does not match corpus batch",
                ));
            }

            entries.extend(batch.iter().cloned().zip(vectors));
        }

        info!(model = %model, passages = entries.len(), "Corpus embedded");

        Ok(Self {
            provider,
            model,
            threshold,
            entries,
        })
    }
}

#[async_trait]
impl DocumentRetriever for EmbeddingRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, DomainError> {
        let query_vector = self
            .provider
            .embed(&self.model, vec![query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::provider(self.provider.provider_name(), "No embedding for query")
            })?;

        let mut scored: Vec<(f32, &CorpusEntry)> = self
            .entries
            .iter()
            .map(|(entry, vector)| (cosine_similarity(&query_vector, vector), entry))
            .filter(|(score, _)| *score >= self.threshold)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let passages: Vec<Passage> = scored
            .into_iter()
            .take(top_k)
            .map(|(_, entry)| entry.to_passage())
            .collect();

        debug!(results = passages.len(), threshold = self.threshold, "Embedding retrieval");

        Ok(passages)
    }

    fn retriever_name(&self) -> &'static str {
        "embedding"
    }
}
