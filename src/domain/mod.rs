//! Domain layer - Core types, traits and pure graph logic

pub mod checkpoint;
pub mod completion;
pub mod conversation;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod grading;
pub mod graph;
pub mod llm;
pub mod prompt;
pub mod retrieval;
pub mod supervisor;

pub use checkpoint::{Checkpoint, CheckpointStore};
pub use completion::{CompletionService, PromptVariables, extract_json_object};
pub use conversation::{ConversationState, RegenerateFlag, StateUpdate, ThreadId, ThreadIdError};
pub use embedding::{EmbeddingProvider, cosine_similarity};
pub use error::DomainError;
pub use generation::{AnswerGenerator, QueryRegenerator};
pub use grading::{GradeKind, GradingService, Verdict, parse_grader_output};
pub use graph::{
    DocumentsDecision, EmptyRetrievalPolicy, GenerationDecision, GraphConfig, GraphError,
    GraphNode, GraphRun, NextStep, NodeExecution, RagGraph, RetryConfig, RunOutcome,
};
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, LlmResponseFormat,
    Message, MessageRole, Usage,
};
pub use prompt::{PromptTemplate, PromptVariable, TemplateError};
pub use retrieval::{DocumentRetriever, Passage, RelevanceGrade};
pub use supervisor::{Route, StaticRouter, SupervisorRouter, ToolsWorkflow};
