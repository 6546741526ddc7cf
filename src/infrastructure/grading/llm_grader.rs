//! LLM-backed binary graders

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::completion::{CompletionService, PromptVariables};
use crate::domain::grading::{GradeKind, GradingService, Verdict, parse_grader_output};
use crate::domain::{DomainError, LlmProvider};
use crate::infrastructure::llm::LlmCompletion;
use crate::infrastructure::prompts;

/// Grading service with one completion per grade kind
#[derive(Debug, Clone)]
pub struct LlmGradingService {
    relevance: Arc<dyn CompletionService>,
    groundedness: Arc<dyn CompletionService>,
    usefulness: Arc<dyn CompletionService>,
}

impl LlmGradingService {
    pub fn new(
        relevance: Arc<dyn CompletionService>,
        groundedness: Arc<dyn CompletionService>,
        usefulness: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            relevance,
            groundedness,
            usefulness,
        }
    }

    /// Build the three graders from the built-in templates
    pub fn from_provider(
        provider: Arc<dyn LlmProvider>,
        model: &str,
        temperature: f32,
    ) -> Result<Self, DomainError> {
        let grader = |content: &str| -> Result<Arc<dyn CompletionService>, DomainError> {
            Ok(Arc::new(
                LlmCompletion::new(provider.clone(), model, prompts::template(content)?)
                    .with_system(prompts::GRADER_SYSTEM)
                    .with_temperature(temperature)
                    .json(),
            ))
        };

        Ok(Self::new(
            grader(prompts::RELEVANCE_GRADER)?,
            grader(prompts::GROUNDEDNESS_GRADER)?,
            grader(prompts::USEFULNESS_GRADER)?,
        ))
    }

    async fn grade(
        &self,
        kind: GradeKind,
        completion: &Arc<dyn CompletionService>,
        variables: PromptVariables,
    ) -> Result<Verdict, DomainError> {
        let raw = completion.complete(variables).await?;

        match parse_grader_output(kind, &raw) {
            Ok(verdict) => {
                debug!(grader = kind.as_str(), verdict = verdict.as_str(), "Grade received");
                Ok(verdict)
            }
            Err(e) => {
                warn!(grader = kind.as_str(), error = %e, "Unparseable grader output");
                Err(e)
            }
        }
    }
}

fn variables(pairs: [(&str, &str); 2]) -> PromptVariables {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[async_trait]
impl GradingService for LlmGradingService {
    async fn grade_relevance(
        &self,
        question: &str,
        document: &str,
    ) -> Result<Verdict, DomainError> {
        self.grade(
            GradeKind::Relevance,
            &self.relevance,
            variables([("question", question), ("document", document)]),
        )
        .await
    }

    async fn grade_groundedness(
        &self,
        documents: &str,
        generation: &str,
    ) -> Result<Verdict, DomainError> {
        self.grade(
            GradeKind::Groundedness,
            &self.groundedness,
            variables([("documents", documents), ("generation", generation)]),
        )
        .await
    }

    async fn grade_usefulness(
        &self,
        question: &str,
        generation: &str,
    ) -> Result<Verdict, DomainError> {
        self.grade(
            GradeKind::Usefulness,
            &self.usefulness,
            variables([("question", question), ("generation", generation)]),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::completion::MockCompletionService;
    use crate::domain::llm::MockLlmProvider;

    fn service(
        relevance: MockCompletionService,
        groundedness: MockCompletionService,
        usefulness: MockCompletionService,
    ) -> (
        LlmGradingService,
        Arc<MockCompletionService>,
        Arc<MockCompletionService>,
        Arc<MockCompletionService>,
    ) {
        let relevance = Arc::new(relevance);
        let groundedness = Arc::new(groundedness);
        let usefulness = Arc::new(usefulness);
        (
            LlmGradingService::new(relevance.clone(), groundedness.clone(), usefulness.clone()),
            relevance,
            groundedness,
            usefulness,
        )
    }

    #[tokio::test]
    async fn test_each_grade_uses_its_own_completion() {
        let (grading, relevance, groundedness, usefulness) = service(
            MockCompletionService::new().with_reply(r#"{"score": "yes"}"#),
            MockCompletionService::new().with_reply(r#"{"score": "no"}"#),
            MockCompletionService::new().with_reply(r#"{"score": "YES"}"#),
        );

        assert_eq!(
            grading.grade_relevance("q", "doc").await.unwrap(),
            Verdict::Yes
        );
        assert_eq!(
            grading.grade_groundedness("docs", "gen").await.unwrap(),
            Verdict::No
        );
        assert_eq!(
            grading.grade_usefulness("q", "gen").await.unwrap(),
            Verdict::Yes
        );

        assert_eq!(relevance.calls()[0]["document"], "doc");
        assert_eq!(groundedness.calls()[0]["documents"], "docs");
        assert_eq!(usefulness.calls()[0]["generation"], "gen");
    }

    #[tokio::test]
    async fn test_malformed_output_is_hard_error() {
        let (grading, _, _, _) = service(
            MockCompletionService::new().with_reply("The document is relevant."),
            MockCompletionService::new(),
            MockCompletionService::new(),
        );

        let err = grading.grade_relevance("q", "doc").await.unwrap_err();
        assert!(matches!(err, DomainError::MalformedGraderOutput { ref grader, .. } if grader == "relevance"));
    }

    #[tokio::test]
    async fn test_completion_error_propagates() {
        let (grading, _, _, _) = service(
            MockCompletionService::new(),
            MockCompletionService::new().with_error(DomainError::timeout("completion", 10)),
            MockCompletionService::new(),
        );

        let err = grading.grade_groundedness("d", "g").await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_from_provider_requests_json() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply(r#"{"score":"no"}"#));
        let grading = LlmGradingService::from_provider(provider.clone(), "grader", 0.0).unwrap();

        let verdict = grading
            .grade_usefulness("What is CRAG?", "It is a retrieval strategy.")
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::No);

        let request = &provider.requests()[0];
        assert!(request.expects_json());
        assert!(request.messages[1].content_text().contains("What is CRAG?"));
    }
}
