use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for chat-completion providers (OpenAI and compatible endpoints)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::domain::llm::Message;

    /// Replays scripted replies in order; the last reply repeats once the script runs out
    #[derive(Debug)]
    pub struct MockLlmProvider {
        name: &'static str,
        replies: Mutex<VecDeque<Result<String, String>>>,
        requests: Mutex<Vec<LlmRequest>>,
    }

    impl MockLlmProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                replies: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_reply(self, content: impl Into<String>) -> Self {
            self.replies.lock().unwrap().push_back(Ok(content.into()));
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            self.replies.lock().unwrap().push_back(Err(error.into()));
            self
        }

        pub fn requests(&self) -> Vec<LlmRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
            self.requests.lock().unwrap().push(request);

            let reply = {
                let mut replies = self.replies.lock().unwrap();
                if replies.len() > 1 {
                    replies.pop_front()
                } else {
                    replies.front().cloned()
                }
            };

            match reply {
                Some(Ok(content)) => Ok(LlmResponse::new(
                    "mock-response".to_string(),
                    model.to_string(),
                    Message::assistant(content),
                )),
                Some(Err(error)) => Err(DomainError::provider(self.name, error)),
                None => Err(DomainError::provider(self.name, "No mock response configured")),
            }
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }
}
