//! Answer generation implementations

mod llm_generator;

pub use llm_generator::{LlmAnswerGenerator, LlmQueryRegenerator};
