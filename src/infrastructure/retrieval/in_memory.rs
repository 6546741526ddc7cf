//! Keyword-overlap retriever over an in-memory corpus

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use super::CorpusEntry;
use crate::domain::{DocumentRetriever, DomainError, Passage};

/// Ranks passages by the number of distinct query terms they contain
///
/// Ties keep corpus order, so identical queries always return identical results.
#[derive(Debug, Clone)]
pub struct InMemoryRetriever {
    entries: Vec<IndexedEntry>,
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    entry: CorpusEntry,
    terms: HashSet<String>,
}

fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 2)
        .map(str::to_lowercase)
        .collect()
}

impl InMemoryRetriever {
    pub fn new(corpus: Vec<CorpusEntry>) -> Self {
        let entries = corpus
            .into_iter()
            .map(|entry| IndexedEntry {
                terms: terms(&entry.text),
                entry,
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl DocumentRetriever for InMemoryRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, DomainError> {
        let query_terms = terms(query);

        let mut scored: Vec<(usize, &IndexedEntry)> = self
            .entries
            .iter()
            .map(|indexed| (indexed.terms.intersection(&query_terms).count(), indexed))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Stable sort keeps corpus order among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let passages: Vec<Passage> = scored
            .into_iter()
            .take(top_k)
            .map(|(_, indexed)| indexed.entry.to_passage())
            .collect();

        debug!(query_terms = query_terms.len(), results = passages.len(), "Keyword retrieval");

        Ok(passages)
    }

    fn retriever_name(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retriever() -> InMemoryRetriever {
        InMemoryRetriever::new(vec![
            CorpusEntry::new("memory.md", "Agent memory stores past observations."),
            CorpusEntry::new("planning.md", "Planning lets an agent decompose tasks into steps."),
            CorpusEntry::new("tools.md", "Tool use extends what an agent can do."),
            CorpusEntry::new("cooking.md", "Boil the pasta for ten minutes."),
        ])
    }

    #[tokio::test]
    async fn test_ranks_by_overlap() {
        let results = retriever()
            .retrieve("How does agent planning decompose tasks?", 4)
            .await
            .unwrap();

        assert_eq!(results[0].source_id, "planning.md");
        assert!(results.iter().all(|p| p.source_id != "cooking.md"));
    }

    #[tokio::test]
    async fn test_ties_keep_corpus_order() {
        let results = retriever().retrieve("agent", 10).await.unwrap();
        let ids: Vec<_> = results.iter().map(|p| p.source_id.as_str()).collect();
        assert_eq!(ids, vec!["memory.md", "planning.md", "tools.md"]);
    }

    #[tokio::test]
    async fn test_respects_top_k() {
        let results = retriever().retrieve("agent", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let results = retriever().retrieve("quantum chromodynamics", 4).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_retrieval_is_idempotent() {
        let retriever = retriever();
        let first = retriever.retrieve("agent tools memory", 3).await.unwrap();
        let second = retriever.retrieve("agent tools memory", 3).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_passages_start_ungraded() {
        let results = retriever().retrieve("pasta", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(!results[0].is_relevant());
    }
}
