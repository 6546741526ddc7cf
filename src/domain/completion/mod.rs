//! Prompt completion domain
//!
//! `complete(variables) -> text` is the single contract every LLM-backed collaborator
//! (graders, generator, regenerator, supervisor) is built on.

mod service;

pub use service::{CompletionService, PromptVariables, extract_json_object};

#[cfg(test)]
pub use service::mock::MockCompletionService;
