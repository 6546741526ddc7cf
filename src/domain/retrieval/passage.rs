use serde::{Deserialize, Serialize};

/// Relevance established for a passage during grading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceGrade {
    #[default]
    Ungraded,
    Relevant,
    Irrelevant,
}

/// A retrieved text passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Passage text
    pub text: String,
    /// Identifier of the source the passage came from
    pub source_id: String,
    /// Grading outcome
    #[serde(default)]
    pub relevance: RelevanceGrade,
}

impl Passage {
    pub fn new(text: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_id: source_id.into(),
            relevance: RelevanceGrade::Ungraded,
        }
    }

    pub fn with_relevance(mut self, relevance: RelevanceGrade) -> Self {
        self.relevance = relevance;
        self
    }

    pub fn is_relevant(&self) -> bool {
        self.relevance == RelevanceGrade::Relevant
    }
}

/// Join passage texts into the single block handed to prompts
pub fn join_passages(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
