//! Infrastructure layer - External service implementations

pub mod checkpoint;
pub mod embedding;
pub mod generation;
pub mod grading;
pub mod graph;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod prompts;
pub mod retrieval;
pub mod services;
pub mod supervisor;
