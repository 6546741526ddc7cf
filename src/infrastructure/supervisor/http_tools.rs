//! Tool-invocation workflow reached over HTTP

use async_trait::async_trait;
use tracing::debug;

use crate::domain::supervisor::ToolsWorkflow;
use crate::domain::DomainError;
use crate::infrastructure::llm::HttpClientTrait;

/// Posts `{"input": question}` to a remote workflow and reads its `output`
#[derive(Debug)]
pub struct HttpToolsWorkflow<C: HttpClientTrait> {
    client: C,
    endpoint: String,
}

impl<C: HttpClientTrait> HttpToolsWorkflow<C> {
    pub fn new(client: C, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> ToolsWorkflow for HttpToolsWorkflow<C> {
    async fn run(&self, question: &str) -> Result<String, DomainError> {
        debug!(endpoint = %self.endpoint, "Invoking tools workflow");

        let body = serde_json::json!({ "input": question });
        let response = self
            .client
            .post_json(
                &self.endpoint,
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await?;

        response
            .get("output")
            .and_then(|o| o.as_str())
            .map(str::to_string)
            .ok_or_else(|| DomainError::provider("tools", "Response has no string 'output' field"))
    }
}
