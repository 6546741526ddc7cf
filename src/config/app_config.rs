use serde::Deserialize;

use crate::domain::GraphConfig;

/// Application configuration
///
/// Every section has defaults so the binary starts without any configuration file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub observability: ObservabilityConfig,
    pub llm: LlmSettings,
    pub retrieval: RetrievalSettings,
    pub graph: GraphConfig,
    pub checkpoint: CheckpointSettings,
    pub supervisor: SupervisorSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Language model backend shared by graders, generator, regenerator and supervisor
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Base URL of an OpenAI-compatible endpoint
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub models: LlmModels,
    pub temperature: f32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmModels {
    pub grader: String,
    pub generator: String,
    pub regenerator: String,
    pub supervisor: String,
    pub embedding: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalBackend {
    /// Keyword overlap over the local corpus
    #[default]
    Keyword,
    /// Cosine similarity over embeddings of the local corpus
    Embedding,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub backend: RetrievalBackend,
    /// JSON file holding `[{"source_id": .., "text": ..}]`
    pub corpus_path: String,
    /// Passages scoring below this cosine similarity are dropped
    pub similarity_threshold: f32,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckpointSettings {
    pub backend: CheckpointBackend,
    pub redis_url: String,
    pub key_prefix: String,
    /// Expiry applied to stored threads, 0 keeps them forever
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SupervisorSettings {
    /// Route through the LLM supervisor; when off every message goes to the RAG workflow
    pub enabled: bool,
    /// Assistant message appended when the supervisor decides to finish
    pub finish_message: String,
    /// Endpoint of the tool-invocation workflow
    pub tools_endpoint: Option<String>,
    pub tools_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub tracing: TracingConfig,
    pub metrics: MetricsConfig,
}

/// OpenTelemetry span export
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub enabled: bool,
    /// OTLP gRPC endpoint
    pub otlp_endpoint: String,
    pub service_name: String,
    /// Fraction of traces kept, between 0.0 and 1.0
    pub sampling_ratio: f64,
}

/// Prometheus exporter
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
    /// Histogram buckets in seconds for every `*_duration_seconds` metric
    ///
    /// Graph runs chain several model calls, so the range reaches well past typical HTTP
    /// latencies.
    pub duration_buckets: Vec<f64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            models: LlmModels::default(),
            temperature: 0.0,
            request_timeout_secs: 60,
        }
    }
}

impl Default for LlmModels {
    fn default() -> Self {
        Self {
            grader: "gpt-4o-mini".to_string(),
            generator: "gpt-4o-mini".to_string(),
            regenerator: "gpt-4o-mini".to_string(),
            supervisor: "gpt-4o-mini".to_string(),
            embedding: "text-embedding-3-small".to_string(),
        }
    }
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            backend: RetrievalBackend::default(),
            corpus_path: "data/corpus.json".to_string(),
            similarity_threshold: 0.2,
        }
    }
}

impl Default for CheckpointSettings {
    fn default() -> Self {
        Self {
            backend: CheckpointBackend::default(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: "rag:checkpoint".to_string(),
            ttl_secs: 0,
        }
    }
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            finish_message: "Glad I could help. Let me know if there is anything else."
                .to_string(),
            tools_endpoint: None,
            tools_timeout_secs: 30,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            service_name: env!("CARGO_PKG_NAME").to_string(),
            sampling_ratio: 1.0,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
            duration_buckets: vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0],
        }
    }
}

impl LlmSettings {
    /// Resolve the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
