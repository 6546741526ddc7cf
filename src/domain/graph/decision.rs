//! Conditional edges of the graph

use super::{EmptyRetrievalPolicy, GraphNode, NextStep};
use crate::domain::conversation::{ConversationState, RegenerateFlag};
use crate::domain::grading::Verdict;

/// Edge taken after `GradeDocuments`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentsDecision {
    Generate,
    Regenerate,
}

impl DocumentsDecision {
    /// Inspect the merged state after grading
    pub fn decide(state: &ConversationState) -> Self {
        if state.regenerate.is_yes() {
            Self::Regenerate
        } else {
            Self::Generate
        }
    }

    pub fn target(&self) -> NextStep {
        match self {
            Self::Generate => NextStep::Node(GraphNode::Generate),
            Self::Regenerate => NextStep::Node(GraphNode::RegenerateQuestion),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Regenerate => "regenerate",
        }
    }
}

/// Edge taken after `Generate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationDecision {
    /// Answer is not grounded in the passages; generate again
    NotSupported,
    /// Grounded and resolves the question
    Useful,
    /// Grounded but does not resolve the question
    NotUseful,
}

impl GenerationDecision {
    pub fn target(&self) -> NextStep {
        match self {
            Self::NotSupported => NextStep::Node(GraphNode::Generate),
            Self::Useful => NextStep::Node(GraphNode::SendResponse),
            Self::NotUseful => NextStep::Node(GraphNode::RegenerateQuestion),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSupported => "not supported",
            Self::Useful => "useful",
            Self::NotUseful => "not useful",
        }
    }
}

/// Flag set by `GradeDocuments` after filtering `retrieved` passages down to `kept`
///
/// Any dropped passage requests regeneration. An empty retrieval is resolved by `policy`.
pub fn documents_flag(retrieved: usize, kept: usize, policy: EmptyRetrievalPolicy) -> RegenerateFlag {
    if retrieved == 0 {
        return match policy {
            EmptyRetrievalPolicy::Regenerate => RegenerateFlag::Yes,
            EmptyRetrievalPolicy::Generate => RegenerateFlag::No,
        };
    }

    RegenerateFlag::from_dropped(kept < retrieved)
}

/// Combine the groundedness verdict with the usefulness verdict
///
/// Usefulness is only consulted for grounded answers, so it is `None` otherwise.
pub fn grade_outcome(grounded: Verdict, useful: Option<Verdict>) -> GenerationDecision {
    match (grounded, useful) {
        (Verdict::No, _) => GenerationDecision::NotSupported,
        (Verdict::Yes, Some(Verdict::Yes)) => GenerationDecision::Useful,
        (Verdict::Yes, _) => GenerationDecision::NotUseful,
    }
}
