//! Graph error types

use thiserror::Error;

use super::GraphNode;

/// Fatal errors that abort a graph execution
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    #[error("Node '{node}' failed after {attempts} attempt(s): {message}")]
    Transient {
        node: GraphNode,
        attempts: u32,
        message: String,
    },

    #[error("Malformed {grader} grader output: {message}")]
    MalformedGraderOutput { grader: String, message: String },

    #[error("Generation limit of {limit} attempts exceeded")]
    GenerationLimitExceeded { limit: u32 },

    #[error("Step limit of {limit} node executions exceeded")]
    StepLimitExceeded { limit: u32 },

    #[error("Node '{node}' failed: {message}")]
    Service { node: GraphNode, message: String },
}

impl GraphError {
    pub fn transient(node: GraphNode, attempts: u32, message: impl Into<String>) -> Self {
        Self::Transient {
            node,
            attempts,
            message: message.into(),
        }
    }

    pub fn malformed_grader_output(grader: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedGraderOutput {
            grader: grader.into(),
            message: message.into(),
        }
    }

    pub fn generation_limit_exceeded(limit: u32) -> Self {
        Self::GenerationLimitExceeded { limit }
    }

    pub fn step_limit_exceeded(limit: u32) -> Self {
        Self::StepLimitExceeded { limit }
    }

    pub fn service(node: GraphNode, message: impl Into<String>) -> Self {
        Self::Service {
            node,
            message: message.into(),
        }
    }

    /// Short label used in metrics and API payloads
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transient { .. } => "transient_service_error",
            Self::MalformedGraderOutput { .. } => "malformed_grader_output",
            Self::GenerationLimitExceeded { .. } => "generation_limit_exceeded",
            Self::StepLimitExceeded { .. } => "step_limit_exceeded",
            Self::Service { .. } => "service_error",
        }
    }
}
