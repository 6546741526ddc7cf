//! Conversation state and its merge rules

use serde::{Deserialize, Serialize};

use crate::domain::llm::Message;
use crate::domain::retrieval::Passage;

/// Tri-state outcome of document grading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegenerateFlag {
    #[default]
    Unset,
    Yes,
    No,
}

impl RegenerateFlag {
    pub fn from_dropped(any_dropped: bool) -> Self {
        if any_dropped { Self::Yes } else { Self::No }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// State shared across node invocations within one graph execution
///
/// `messages` only ever grows. Every other field is replaced wholesale by the node that
/// owns it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub documents: Vec<Passage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(default)]
    pub regenerate: RegenerateFlag,
}

impl ConversationState {
    /// Fresh state holding a single user message
    pub fn from_user_message(content: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.begin_turn(Message::user(content));
        state
    }

    /// Start a new turn on a resumed thread
    ///
    /// History is kept, the per-turn fields go back to their fresh values.
    pub fn begin_turn(&mut self, user_message: Message) {
        append_messages(&mut self.messages, vec![user_message]);
        self.question = String::new();
        self.documents = Vec::new();
        self.generation = None;
        self.regenerate = RegenerateFlag::Unset;
    }

    /// Merge a node's partial update into the state
    pub fn apply(&mut self, update: StateUpdate) {
        append_messages(&mut self.messages, update.messages);
        overwrite(&mut self.question, update.question);
        overwrite(&mut self.documents, update.documents);
        if let Some(generation) = update.generation {
            self.generation = Some(generation);
        }
        overwrite(&mut self.regenerate, update.regenerate);
    }

    pub fn latest_user_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_user())
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn relevant_documents(&self) -> impl Iterator<Item = &Passage> {
        self.documents.iter().filter(|p| p.is_relevant())
    }
}

/// Partial update returned by a node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub messages: Vec<Message>,
    pub question: Option<String>,
    pub documents: Option<Vec<Passage>>,
    pub generation: Option<String>,
    pub regenerate: Option<RegenerateFlag>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn with_documents(mut self, documents: Vec<Passage>) -> Self {
        self.documents = Some(documents);
        self
    }

    pub fn with_generation(mut self, generation: impl Into<String>) -> Self {
        self.generation = Some(generation.into());
        self
    }

    pub fn with_regenerate(mut self, regenerate: RegenerateFlag) -> Self {
        self.regenerate = Some(regenerate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
            && self.question.is_none()
            && self.documents.is_none()
            && self.generation.is_none()
            && self.regenerate.is_none()
    }
}

/// Append accumulator used for `messages`
pub fn append_messages(current: &mut Vec<Message>, incoming: Vec<Message>) {
    current.extend(incoming);
}

/// Last-writer-wins merge used for every scalar field
pub fn overwrite<T>(current: &mut T, incoming: Option<T>) {
    if let Some(value) = incoming {
        *current = value;
    }
}
