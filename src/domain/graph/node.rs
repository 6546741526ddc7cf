use std::fmt;

use serde::{Deserialize, Serialize};

/// Nodes of the RAG graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphNode {
    Retrieve,
    GradeDocuments,
    Generate,
    RegenerateQuestion,
    SendResponse,
}

impl GraphNode {
    /// Entry node of every execution
    pub const ENTRY: GraphNode = GraphNode::Retrieve;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retrieve => "retrieve",
            Self::GradeDocuments => "grade_documents",
            Self::Generate => "generate",
            Self::RegenerateQuestion => "regenerate_question",
            Self::SendResponse => "send_response",
        }
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where control goes after a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Node(GraphNode),
    End,
}

impl From<GraphNode> for NextStep {
    fn from(node: GraphNode) -> Self {
        Self::Node(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_names() {
        assert_eq!(GraphNode::Retrieve.as_str(), "retrieve");
        assert_eq!(GraphNode::GradeDocuments.as_str(), "grade_documents");
        assert_eq!(GraphNode::Generate.as_str(), "generate");
        assert_eq!(GraphNode::RegenerateQuestion.as_str(), "regenerate_question");
        assert_eq!(GraphNode::SendResponse.as_str(), "send_response");
    }

    #[test]
    fn test_node_serde_matches_as_str() {
        for node in [
            GraphNode::Retrieve,
            GraphNode::GradeDocuments,
            GraphNode::Generate,
            GraphNode::RegenerateQuestion,
            GraphNode::SendResponse,
        ] {
            let json = serde_json::to_string(&node).unwrap();
            assert_eq!(json, format!("\"{}\"", node.as_str()));
        }
    }
}
