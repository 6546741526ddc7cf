//! Grading service implementations

mod llm_grader;

pub use llm_grader::LlmGradingService;
