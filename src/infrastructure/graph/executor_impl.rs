//! RAG graph executor implementation

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, error, info, warn};

use crate::domain::conversation::{ConversationState, StateUpdate};
use crate::domain::generation::{AnswerGenerator, QueryRegenerator};
use crate::domain::grading::{GradeKind, GradingService, Verdict};
use crate::domain::graph::{
    DocumentsDecision, GraphConfig, GraphError, GraphNode, GraphRun, NextStep, NodeExecution,
    RagGraph, RunOutcome, documents_flag, grade_outcome,
};
use crate::domain::retrieval::{DocumentRetriever, Passage, RelevanceGrade, join_passages};
use crate::domain::{DomainError, Message};
use crate::infrastructure::observability::{
    record_grader_verdict, record_graph_node, record_graph_run,
};

/// Successful node result, merged into the state by the run loop
struct NodeOutput {
    update: StateUpdate,
    next: NextStep,
    decision: Option<&'static str>,
    /// Highest attempt count of any external call made by the node
    attempts: u32,
}

impl NodeOutput {
    fn new(update: StateUpdate, next: impl Into<NextStep>, attempts: u32) -> Self {
        Self {
            update,
            next: next.into(),
            decision: None,
            attempts,
        }
    }

    fn with_decision(mut self, decision: &'static str) -> Self {
        self.decision = Some(decision);
        self
    }
}

/// Drives a conversation state through retrieve, grade, generate and respond
#[derive(Debug)]
pub struct RagGraphExecutor {
    retriever: Arc<dyn DocumentRetriever>,
    grader: Arc<dyn GradingService>,
    generator: Arc<dyn AnswerGenerator>,
    regenerator: Arc<dyn QueryRegenerator>,
    config: GraphConfig,
}

impl RagGraphExecutor {
    pub fn new(
        retriever: Arc<dyn DocumentRetriever>,
        grader: Arc<dyn GradingService>,
        generator: Arc<dyn AnswerGenerator>,
        regenerator: Arc<dyn QueryRegenerator>,
    ) -> Self {
        Self::with_config(retriever, grader, generator, regenerator, GraphConfig::default())
    }

    pub fn with_config(
        retriever: Arc<dyn DocumentRetriever>,
        grader: Arc<dyn GradingService>,
        generator: Arc<dyn AnswerGenerator>,
        regenerator: Arc<dyn QueryRegenerator>,
        config: GraphConfig,
    ) -> Self {
        Self {
            retriever,
            grader,
            generator,
            regenerator,
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Run one external call under the node timeout, retrying transient failures
    async fn call<T, F, Fut>(
        &self,
        node: GraphNode,
        operation: &str,
        mut f: F,
    ) -> Result<(T, u32), GraphError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let retry = &self.config.retry;
        let max_attempts = retry.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = match tokio::time::timeout(self.config.node_timeout(), f()).await {
                Ok(result) => result,
                Err(_) => Err(DomainError::timeout(operation, self.config.node_timeout_ms)),
            };

            let error = match result {
                Ok(value) => return Ok((value, attempt)),
                Err(e) => e,
            };

            if let DomainError::MalformedGraderOutput { grader, message } = error {
                return Err(GraphError::malformed_grader_output(grader, message));
            }

            if !error.is_transient() {
                return Err(GraphError::service(node, error.to_string()));
            }

            if attempt >= max_attempts {
                return Err(GraphError::transient(node, attempt, error.to_string()));
            }

            let delay = retry.delay_for_attempt(attempt - 1);
            warn!(
                node = node.as_str(),
                operation,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Transient failure, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn execute_node(
        &self,
        node: GraphNode,
        state: &ConversationState,
        generate_calls: &mut u32,
    ) -> Result<NodeOutput, GraphError> {
        match node {
            GraphNode::Retrieve => self.retrieve(state).await,
            GraphNode::GradeDocuments => self.grade_documents(state).await,
            GraphNode::Generate => {
                let limit = self.config.max_generation_attempts;
                if *generate_calls >= limit {
                    return Err(GraphError::generation_limit_exceeded(limit));
                }
                *generate_calls += 1;
                self.generate(state).await
            }
            GraphNode::RegenerateQuestion => self.regenerate_question(state).await,
            GraphNode::SendResponse => Ok(self.send_response(state)),
        }
    }

    async fn retrieve(&self, state: &ConversationState) -> Result<NodeOutput, GraphError> {
        let question = state
            .latest_user_message()
            .map(|m| m.content_text().to_string())
            .ok_or_else(|| GraphError::service(GraphNode::Retrieve, "No user message to answer"))?;

        let (documents, attempts) = self
            .call(GraphNode::Retrieve, "retriever", || {
                self.retriever.retrieve(&question, self.config.top_k)
            })
            .await?;

        debug!(
            retriever = self.retriever.retriever_name(),
            documents = documents.len(),
            "Retrieved documents"
        );

        let update = StateUpdate::new()
            .with_question(question)
            .with_documents(documents);

        Ok(NodeOutput::new(update, GraphNode::GradeDocuments, attempts))
    }

    async fn grade_documents(&self, state: &ConversationState) -> Result<NodeOutput, GraphError> {
        let question = state.question.as_str();
        let concurrency = self.config.grading_concurrency.max(1);

        let grading: Vec<_> = state
            .documents
            .iter()
            .map(|passage| {
                self.call(GraphNode::GradeDocuments, "relevance_grader", move || {
                    self.grader.grade_relevance(question, &passage.text)
                })
            })
            .collect();

        let grades: Vec<(Verdict, u32)> = stream::iter(grading)
            .buffered(concurrency)
            .try_collect()
            .await?;

        let attempts = grades.iter().map(|(_, a)| *a).max().unwrap_or(1);

        let kept: Vec<Passage> = state
            .documents
            .iter()
            .zip(&grades)
            .filter_map(|(passage, (verdict, _))| {
                record_grader_verdict(GradeKind::Relevance.as_str(), verdict.as_str());
                verdict
                    .is_yes()
                    .then(|| passage.clone().with_relevance(RelevanceGrade::Relevant))
            })
            .collect();

        let flag = documents_flag(grades.len(), kept.len(), self.config.empty_retrieval);
        debug!(
            retrieved = grades.len(),
            kept = kept.len(),
            regenerate = ?flag,
            "Graded documents"
        );

        let mut next = state.clone();
        let update = StateUpdate::new().with_documents(kept).with_regenerate(flag);
        next.apply(update.clone());
        let decision = DocumentsDecision::decide(&next);

        Ok(NodeOutput::new(update, decision.target(), attempts).with_decision(decision.as_str()))
    }

    async fn generate(&self, state: &ConversationState) -> Result<NodeOutput, GraphError> {
        let question = state.question.as_str();
        let documents: Vec<Passage> = state.relevant_documents().cloned().collect();

        let (generation, generate_attempts) = self
            .call(GraphNode::Generate, "answer_generator", || {
                self.generator.generate(question, &documents)
            })
            .await?;

        let context = join_passages(&documents);
        let (grounded, grounded_attempts) = self
            .call(GraphNode::Generate, "groundedness_grader", || {
                self.grader.grade_groundedness(&context, &generation)
            })
            .await?;
        record_grader_verdict(GradeKind::Groundedness.as_str(), grounded.as_str());

        let mut attempts = generate_attempts.max(grounded_attempts);

        let useful = if grounded.is_yes() {
            let (useful, useful_attempts) = self
                .call(GraphNode::Generate, "usefulness_grader", || {
                    self.grader.grade_usefulness(question, &generation)
                })
                .await?;
            record_grader_verdict(GradeKind::Usefulness.as_str(), useful.as_str());
            attempts = attempts.max(useful_attempts);
            Some(useful)
        } else {
            None
        };

        let decision = grade_outcome(grounded, useful);
        debug!(decision = decision.as_str(), "Graded generation");

        let update = StateUpdate::new().with_generation(generation);
        Ok(NodeOutput::new(update, decision.target(), attempts).with_decision(decision.as_str()))
    }

    async fn regenerate_question(
        &self,
        state: &ConversationState,
    ) -> Result<NodeOutput, GraphError> {
        let (generation, attempts) = self
            .call(GraphNode::RegenerateQuestion, "query_regenerator", || {
                self.regenerator.regenerate(&state.question, &state.documents)
            })
            .await?;

        let update = StateUpdate::new().with_generation(generation);
        Ok(NodeOutput::new(update, GraphNode::SendResponse, attempts))
    }

    fn send_response(&self, state: &ConversationState) -> NodeOutput {
        let content = state
            .generation
            .clone()
            .unwrap_or_else(|| self.config.fallback_message.clone());

        let update = StateUpdate::new().with_message(Message::assistant(content));
        NodeOutput::new(update, NextStep::End, 1)
    }

    fn abort(&self, mut state: ConversationState, error: GraphError) -> (ConversationState, RunOutcome) {
        error!(error = %error, kind = error.kind(), "Graph run aborted, sending fallback message");
        state.apply(
            StateUpdate::new().with_message(Message::assistant(self.config.fallback_message.clone())),
        );
        (state, RunOutcome::Aborted(error))
    }
}

fn failed_attempts(error: &GraphError) -> u32 {
    match error {
        GraphError::Transient { attempts, .. } => *attempts,
        GraphError::GenerationLimitExceeded { .. } | GraphError::StepLimitExceeded { .. } => 0,
        _ => 1,
    }
}

#[async_trait]
impl RagGraph for RagGraphExecutor {
    async fn run(&self, mut state: ConversationState) -> GraphRun {
        let start = Instant::now();
        let mut path = Vec::new();
        let mut generate_calls = 0;
        let mut steps = 0;
        let mut current = NextStep::Node(GraphNode::ENTRY);

        info!(messages = state.messages.len(), "Starting RAG graph run");

        let outcome = loop {
            let node = match current {
                NextStep::Node(node) => node,
                NextStep::End => break RunOutcome::Completed,
            };

            if steps >= self.config.max_steps {
                let (aborted, outcome) =
                    self.abort(state, GraphError::step_limit_exceeded(self.config.max_steps));
                state = aborted;
                break outcome;
            }
            steps += 1;

            let node_start = Instant::now();
            debug!(node = node.as_str(), step = steps, "Executing node");

            let result = self.execute_node(node, &state, &mut generate_calls).await;
            match result {
                Ok(output) => {
                    let elapsed = node_start.elapsed();
                    record_graph_node(node.as_str(), true, elapsed);

                    let mut execution =
                        NodeExecution::success(node, output.attempts, elapsed.as_millis() as u64);
                    if let Some(decision) = output.decision {
                        execution = execution.with_decision(decision);
                    }
                    path.push(execution);

                    state.apply(output.update);
                    current = output.next;
                }
                Err(e) => {
                    let elapsed = node_start.elapsed();
                    record_graph_node(node.as_str(), false, elapsed);
                    path.push(NodeExecution::failure(
                        node,
                        failed_attempts(&e),
                        e.to_string(),
                        elapsed.as_millis() as u64,
                    ));

                    let (aborted, outcome) = self.abort(state, e);
                    state = aborted;
                    break outcome;
                }
            }
        };

        let elapsed = start.elapsed();
        let outcome_label = match &outcome {
            RunOutcome::Completed => "completed",
            RunOutcome::Aborted(e) => e.kind(),
        };
        record_graph_run(outcome_label, elapsed);

        info!(
            outcome = outcome_label,
            steps,
            generate_calls,
            execution_time_ms = elapsed.as_millis() as u64,
            "RAG graph run finished"
        );

        GraphRun {
            state,
            path,
            generate_calls,
            execution_time_ms: elapsed.as_millis() as u64,
            outcome,
        }
    }
}
