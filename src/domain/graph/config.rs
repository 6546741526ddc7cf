//! Graph execution configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What `GradeDocuments` does when retrieval found nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyRetrievalPolicy {
    /// Let the generator answer without supporting passages
    #[default]
    Generate,
    /// Nothing passed relevance, so fall back to the regenerated response
    Regenerate,
}

/// Retry configuration for transient node failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay before first retry
    pub initial_delay_ms: u64,
    /// Maximum delay between retries
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// No retries at all
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn with_initial_delay(mut self, ms: u64) -> Self {
        self.initial_delay_ms = ms;
        self
    }

    pub fn with_max_delay(mut self, ms: u64) -> Self {
        self.max_delay_ms = ms;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Total attempts including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Calculate delay for a given attempt number (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_millis(self.initial_delay_ms.min(self.max_delay_ms));
        }

        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        let delay_ms = delay.min(self.max_delay_ms as f64) as u64;

        Duration::from_millis(delay_ms)
    }
}

/// Limits and policies applied to every graph execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Passages requested from the retriever
    pub top_k: usize,
    /// Maximum number of times `Generate` may be entered in one execution
    pub max_generation_attempts: u32,
    /// Maximum node executions in one run
    pub max_steps: u32,
    /// Timeout applied to every external call
    pub node_timeout_ms: u64,
    pub retry: RetryConfig,
    /// Concurrent relevance grades within `GradeDocuments`
    pub grading_concurrency: usize,
    /// Assistant message appended when a run aborts
    pub fallback_message: String,
    pub empty_retrieval: EmptyRetrievalPolicy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            max_generation_attempts: 3,
            max_steps: 25,
            node_timeout_ms: 60_000,
            retry: RetryConfig::default(),
            grading_concurrency: 4,
            fallback_message: "Sorry, I could not produce an answer to that question right now. Please try again.".to_string(),
            empty_retrieval: EmptyRetrievalPolicy::default(),
        }
    }
}

impl GraphConfig {
    pub fn node_timeout(&self) -> Duration {
        Duration::from_millis(self.node_timeout_ms)
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_max_generation_attempts(mut self, attempts: u32) -> Self {
        self.max_generation_attempts = attempts;
        self
    }

    pub fn with_max_steps(mut self, steps: u32) -> Self {
        self.max_steps = steps;
        self
    }

    pub fn with_node_timeout(mut self, timeout: Duration) -> Self {
        self.node_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_grading_concurrency(mut self, concurrency: usize) -> Self {
        self.grading_concurrency = concurrency;
        self
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn with_empty_retrieval(mut self, policy: EmptyRetrievalPolicy) -> Self {
        self.empty_retrieval = policy;
        self
    }
}
