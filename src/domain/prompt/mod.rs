//! Prompt templates with `${var:name}` placeholders

mod template;

pub use template::{PromptTemplate, PromptVariable, TemplateError};
