//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for embedding providers (OpenAI and compatible endpoints)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed every input, returning one vector per input in the same order
    async fn embed(&self, model: &str, inputs: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Returns configured vectors for known texts and a zero vector otherwise
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        dimensions: usize,
        vectors: HashMap<String, Vec<f32>>,
        error: Option<String>,
        batches: Mutex<Vec<usize>>,
    }

    impl MockEmbeddingProvider {
        pub fn new(dimensions: usize) -> Self {
            Self {
                dimensions,
                vectors: HashMap::new(),
                error: None,
                batches: Mutex::new(Vec::new()),
            }
        }

        pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
            self.vectors.insert(text.into(), vector);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Sizes of the batches received so far
        pub fn batches(&self) -> Vec<usize> {
            self.batches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(
            &self,
            _model: &str,
            inputs: Vec<String>,
        ) -> Result<Vec<Vec<f32>>, DomainError> {
            self.batches.lock().unwrap().push(inputs.len());

            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            Ok(inputs
                .iter()
                .map(|text| {
                    self.vectors
                        .get(text)
                        .cloned()
                        .unwrap_or_else(|| vec![0.0; self.dimensions])
                })
                .collect())
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
