use std::sync::Arc;
use std::time::Duration;

use super::http_client::HttpClient;
use super::OpenAiProvider;
use crate::config::LlmSettings;
use crate::domain::{DomainError, EmbeddingProvider, LlmProvider};
use crate::infrastructure::embedding::OpenAiEmbeddingProvider;

/// Factory for creating LLM and embedding providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create the chat provider described by the settings
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let api_key = Self::api_key(settings)?;
        let client = Self::http_client(settings)?;

        Ok(Arc::new(OpenAiProvider::with_base_url(
            client,
            api_key,
            &settings.base_url,
        )))
    }

    /// Create the embedding provider described by the settings
    pub fn create_embedding(
        settings: &LlmSettings,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let api_key = Self::api_key(settings)?;
        let client = Self::http_client(settings)?;

        Ok(Arc::new(OpenAiEmbeddingProvider::with_base_url(
            client,
            api_key,
            &settings.base_url,
        )))
    }

    /// Create an OpenAI provider directly
    pub fn create_openai(api_key: impl Into<String>) -> Arc<dyn LlmProvider> {
        Arc::new(OpenAiProvider::new(HttpClient::new(), api_key))
    }

    fn api_key(settings: &LlmSettings) -> Result<String, DomainError> {
        settings.api_key().ok_or_else(|| {
            DomainError::configuration(format!(
                "LLM API key not set: export {}",
                settings.api_key_env
            ))
        })
    }

    fn http_client(settings: &LlmSettings) -> Result<HttpClient, DomainError> {
        HttpClient::with_timeout(Duration::from_secs(settings.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai() {
        let provider = LlmProviderFactory::create_openai("test-key");
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_create_without_api_key_fails() {
        let settings = LlmSettings {
            api_key_env: "RAG_SUPERVISOR_FACTORY_TEST_UNSET".to_string(),
            ..Default::default()
        };

        let err = LlmProviderFactory::create(&settings).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
        assert!(err.to_string().contains("RAG_SUPERVISOR_FACTORY_TEST_UNSET"));
    }
}
