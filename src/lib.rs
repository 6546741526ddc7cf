//! Supervisor-routed RAG service
//!
//! A supervisor sends each user message either to a retrieval-augmented answer graph or
//! to an external tools workflow. The RAG graph retrieves passages, grades them for
//! relevance, generates an answer, checks it for groundedness and usefulness, and falls
//! back to a regenerated response when the evidence is not good enough. Conversation
//! state is checkpointed per thread.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use config::{LlmSettings, RetrievalBackend, RetrievalSettings};
use domain::{DocumentRetriever, DomainError, LlmProvider, Route, StaticRouter, SupervisorRouter};
use infrastructure::checkpoint::create_checkpoint_store;
use infrastructure::generation::{LlmAnswerGenerator, LlmQueryRegenerator};
use infrastructure::grading::LlmGradingService;
use infrastructure::graph::RagGraphExecutor;
use infrastructure::llm::{HttpClient, LlmProviderFactory};
use infrastructure::retrieval::{load_corpus, EmbeddingRetriever, InMemoryRetriever};
use infrastructure::services::{ConversationService, ConversationServiceConfig};
use infrastructure::supervisor::{HttpToolsWorkflow, LlmSupervisorRouter};

/// Create the application state for the HTTP API
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    Ok(AppState::new(create_conversation_service(config).await?))
}

/// Wire every collaborator described by `config` into a conversation service
pub async fn create_conversation_service(
    config: &AppConfig,
) -> anyhow::Result<Arc<ConversationService>> {
    let llm = &config.llm;
    let provider = LlmProviderFactory::create(llm)?;

    let retriever = create_retriever(&config.retrieval, llm).await?;
    let grader = LlmGradingService::from_provider(provider.clone(), &llm.models.grader, llm.temperature)?;
    let generator =
        LlmAnswerGenerator::from_provider(provider.clone(), &llm.models.generator, llm.temperature)?;
    let regenerator = LlmQueryRegenerator::from_provider(
        provider.clone(),
        &llm.models.regenerator,
        llm.temperature,
    )?;

    let graph = RagGraphExecutor::with_config(
        retriever,
        Arc::new(grader),
        Arc::new(generator),
        Arc::new(regenerator),
        config.graph.clone(),
    );

    let store = create_checkpoint_store(&config.checkpoint).await?;
    let router = create_router(config, provider)?;

    let mut service = ConversationService::new(store, router, Arc::new(graph)).with_config(
        ConversationServiceConfig {
            finish_message: config.supervisor.finish_message.clone(),
            fallback_message: config.graph.fallback_message.clone(),
        },
    );

    if let Some(endpoint) = &config.supervisor.tools_endpoint {
        let client =
            HttpClient::with_timeout(Duration::from_secs(config.supervisor.tools_timeout_secs))?;
        service = service.with_tools(Arc::new(HttpToolsWorkflow::new(client, endpoint)));
        info!(endpoint = %endpoint, "Tools workflow enabled");
    }

    Ok(Arc::new(service))
}

fn create_router(
    config: &AppConfig,
    provider: Arc<dyn LlmProvider>,
) -> Result<Arc<dyn SupervisorRouter>, DomainError> {
    if !config.supervisor.enabled {
        info!("Supervisor disabled, every message goes to the RAG workflow");
        return Ok(Arc::new(StaticRouter(Route::RagWorkflow)));
    }

    Ok(Arc::new(LlmSupervisorRouter::from_provider(
        provider,
        &config.llm.models.supervisor,
        config.llm.temperature,
    )?))
}

async fn create_retriever(
    settings: &RetrievalSettings,
    llm: &LlmSettings,
) -> Result<Arc<dyn DocumentRetriever>, DomainError> {
    let corpus = load_corpus(&settings.corpus_path)?;
    info!(
        path = %settings.corpus_path,
        passages = corpus.len(),
        backend = ?settings.backend,
        "Loaded corpus"
    );

    match settings.backend {
        RetrievalBackend::Keyword => Ok(Arc::new(InMemoryRetriever::new(corpus))),
        RetrievalBackend::Embedding => {
            let embeddings = LlmProviderFactory::create_embedding(llm)?;
            let retriever = EmbeddingRetriever::build(
                embeddings,
                &llm.models.embedding,
                corpus,
                settings.similarity_threshold,
            )
            .await?;
            Ok(Arc::new(retriever))
        }
    }
}
