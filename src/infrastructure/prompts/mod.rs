//! Default prompt templates
//!
//! Templates use `${var:name}` placeholders. Graders and the supervisor must answer with a
//! single JSON object.

use crate::domain::{DomainError, PromptTemplate};

pub const GRADER_SYSTEM: &str =
    "You are a strict binary grader. Reply with a JSON object and nothing else.";

pub const RELEVANCE_GRADER: &str = r#"Assess whether a retrieved document is relevant to a user question.

Retrieved document:
-------
${var:document}
-------

User question: ${var:question}

Grade the document as relevant if it contains keywords or meaning related to the question. This is a coarse filter for erroneous retrievals, not a stringent test.
Reply with {"score": "yes"} if relevant and {"score": "no"} otherwise."#;

pub const GROUNDEDNESS_GRADER: &str = r#"Assess whether an answer is grounded in, and supported by, a set of facts.

Facts:
-------
${var:documents}
-------

Answer: ${var:generation}

Reply with {"score": "yes"} if every claim in the answer is supported by the facts and {"score": "no"} otherwise."#;

pub const USEFULNESS_GRADER: &str = r#"Assess whether an answer is useful to resolve a question.

Answer:
-------
${var:generation}
-------

Question: ${var:question}

Reply with {"score": "yes"} if the answer resolves the question and {"score": "no"} otherwise."#;

pub const ANSWER_GENERATOR: &str = r#"You answer questions using only the documents below. If they do not contain the answer, say that you don't know.
Format the answer as Markdown, three sentences at most.

Question: ${var:question}

Documents:
${var:documents}

Answer:"#;

pub const QUERY_REGENERATOR: &str = r#"The documents below could not answer the user's question.
Tell the user you could not find the answer in the available documents and ask them to clarify or add detail to what they want. Three sentences at most.

Question: ${var:question}

Documents:
${var:documents}

Answer:"#;

pub const SUPERVISOR: &str = r#"You manage the following workers: ${var:team_members}.
Given the conversation below, choose the worker that should act next.
Questions about flights, cars, hotels or travel go to ToolsWorkflow. Questions answerable from the document collection go to RAGWorkflow.
When the request is complete, or no worker can answer it, choose FINISH.

Conversation:
${var:conversation}

Reply with a JSON object {"next": "<one of ${var:options}>"}."#;

/// Parse one of the built-in templates
pub fn template(content: &str) -> Result<PromptTemplate, DomainError> {
    Ok(PromptTemplate::parse(content)?)
}
