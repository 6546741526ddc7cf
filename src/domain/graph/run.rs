//! Graph run results

use serde::{Deserialize, Serialize};

use super::{GraphError, GraphNode};
use crate::domain::conversation::ConversationState;

/// One node execution on the path through the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeExecution {
    pub node: GraphNode,
    pub success: bool,
    /// Attempts made, including retries
    pub attempts: u32,
    /// Routing decision taken after the node, when it has a conditional edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub execution_time_ms: u64,
}

impl NodeExecution {
    pub fn success(node: GraphNode, attempts: u32, execution_time_ms: u64) -> Self {
        Self {
            node,
            success: true,
            attempts,
            decision: None,
            error: None,
            execution_time_ms,
        }
    }

    pub fn failure(
        node: GraphNode,
        attempts: u32,
        error: impl Into<String>,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            node,
            success: false,
            attempts,
            decision: None,
            error: Some(error.into()),
            execution_time_ms,
        }
    }

    pub fn with_decision(mut self, decision: impl Into<String>) -> Self {
        self.decision = Some(decision.into());
        self
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed,
    /// A fatal error stopped the run; the fallback message was still sent
    Aborted(GraphError),
}

/// Result of one graph execution
#[derive(Debug, Clone)]
pub struct GraphRun {
    /// Final merged state
    pub state: ConversationState,
    /// Nodes in execution order
    pub path: Vec<NodeExecution>,
    /// Times `Generate` was entered
    pub generate_calls: u32,
    pub execution_time_ms: u64,
    pub outcome: RunOutcome,
}

impl GraphRun {
    /// Terminal assistant message appended by this run
    pub fn reply(&self) -> Option<&str> {
        self.state
            .last_message()
            .filter(|m| m.is_assistant())
            .map(|m| m.content_text())
    }

    /// Node names in execution order
    pub fn visited(&self) -> Vec<GraphNode> {
        self.path.iter().map(|e| e.node).collect()
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, RunOutcome::Completed)
    }

    pub fn error(&self) -> Option<&GraphError> {
        match &self.outcome {
            RunOutcome::Completed => None,
            RunOutcome::Aborted(error) => Some(error),
        }
    }
}
