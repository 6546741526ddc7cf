//! LLM provider implementations

mod completion;
mod factory;
mod http_client;
mod openai;

pub use completion::LlmCompletion;
pub use factory::LlmProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::{DEFAULT_OPENAI_BASE_URL, OpenAiProvider};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
