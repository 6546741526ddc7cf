//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::domain::DomainError;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-_a-zA-Z0-9]*)(?::([^}]*))?\}")
        .expect("variable pattern is a valid regex")
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },

    #[error("Template declares no variables")]
    NoVariables,
}

impl From<TemplateError> for DomainError {
    fn from(err: TemplateError) -> Self {
        DomainError::configuration(err.to_string())
    }
}

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
}

impl PromptVariable {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract its variables
    pub fn parse(content: impl Into<String>) -> Result<Self, TemplateError> {
        let content = content.into();
        let mut variables = Vec::new();
        let mut seen = HashSet::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let Some(name) = cap.get(1).map(|m| m.as_str().to_string()) else {
                continue;
            };

            if !seen.insert(name.clone()) {
                continue;
            }

            variables.push(PromptVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        if variables.is_empty() {
            return Err(TemplateError::NoVariables);
        }

        Ok(Self { content, variables })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    /// Names of variables without a default value
    pub fn required_variables(&self) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|v| v.is_required())
            .map(|v| v.name.as_str())
            .collect()
    }

    /// Render the template with provided values
    ///
    /// Substitution is a single pass, so placeholders inside substituted values are left
    /// untouched.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables
            .iter()
            .find(|v| v.is_required() && !values.contains_key(&v.name))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.name.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |caps: &Captures| {
            values
                .get(&caps[1])
                .cloned()
                .or_else(|| caps.get(2).map(|m| m.as_str().to_string()))
                .unwrap_or_default()
        });

        Ok(rendered.into_owned())
    }
}
