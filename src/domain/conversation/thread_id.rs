//! Thread identifier

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Maximum length for thread IDs
pub const MAX_THREAD_ID_LENGTH: usize = 128;

static THREAD_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.:-]+$").expect("valid thread id pattern"));

/// Thread ID validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadIdError {
    Empty,
    TooLong { length: usize, max: usize },
    InvalidFormat { id: String },
}

impl fmt::Display for ThreadIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Thread ID cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Thread ID too long: {} characters (max {})", length, max)
            }
            Self::InvalidFormat { id } => write!(
                f,
                "Invalid thread ID format '{}': allowed characters are letters, digits, '_', '.', ':' and '-'",
                id
            ),
        }
    }
}

impl std::error::Error for ThreadIdError {}

impl From<ThreadIdError> for DomainError {
    fn from(err: ThreadIdError) -> Self {
        DomainError::invalid_id(err.to_string())
    }
}

/// Key identifying one ongoing conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThreadId(String);

impl ThreadId {
    /// Create a new ThreadId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ThreadIdError> {
        let id = id.into();

        if id.is_empty() {
            return Err(ThreadIdError::Empty);
        }

        if id.len() > MAX_THREAD_ID_LENGTH {
            return Err(ThreadIdError::TooLong {
                length: id.len(),
                max: MAX_THREAD_ID_LENGTH,
            });
        }

        if !THREAD_ID_PATTERN.is_match(&id) {
            return Err(ThreadIdError::InvalidFormat { id });
        }

        Ok(Self(id))
    }

    /// Generate a fresh random thread ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ThreadId {
    type Error = ThreadIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThreadId> for String {
    fn from(id: ThreadId) -> Self {
        id.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
