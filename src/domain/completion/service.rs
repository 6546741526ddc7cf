use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Named values substituted into a prompt template
pub type PromptVariables = HashMap<String, String>;

/// Renders a prompt with variables and returns the model's text
#[async_trait]
pub trait CompletionService: Send + Sync + Debug {
    async fn complete(&self, variables: PromptVariables) -> Result<String, DomainError>;
}

/// Extract the outermost JSON object from a completion (handles prose and markdown fences)
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted completions in order; the last one repeats once the script runs out
    #[derive(Debug, Default)]
    pub struct MockCompletionService {
        replies: Mutex<VecDeque<Result<String, DomainError>>>,
        calls: Mutex<Vec<PromptVariables>>,
    }

    impl MockCompletionService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_reply(self, reply: impl Into<String>) -> Self {
            self.replies.lock().unwrap().push_back(Ok(reply.into()));
            self
        }

        pub fn with_error(self, error: DomainError) -> Self {
            self.replies.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn calls(&self) -> Vec<PromptVariables> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionService for MockCompletionService {
        async fn complete(&self, variables: PromptVariables) -> Result<String, DomainError> {
            self.calls.lock().unwrap().push(variables);

            let mut replies = self.replies.lock().unwrap();
            let reply = if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            };

            reply.unwrap_or_else(|| Err(DomainError::internal("No mock completion configured")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object() {
        let text = r#"Here is the result: {"score": "yes"}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"score": "yes"}"#));
    }

    #[test]
    fn test_extract_json_object_with_markdown() {
        let text = "```json\n{\"next\": \"FINISH\"}\n```";
        assert_eq!(extract_json_object(text), Some(r#"{"next": "FINISH"}"#));
    }

    #[test]
    fn test_extract_json_object_none() {
        assert_eq!(extract_json_object("yes"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }
}
