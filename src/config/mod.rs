//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CheckpointBackend, CheckpointSettings, LlmModels, LlmSettings, LogFormat,
    LoggingConfig, MetricsConfig, ObservabilityConfig, RetrievalBackend, RetrievalSettings,
    ServerConfig, SupervisorSettings, TracingConfig,
};
