//! Grading domain
//!
//! Three independent binary classifiers judge the retrieved passages and the candidate
//! answer: relevance, groundedness and usefulness.

mod grader;
mod verdict;

pub use grader::GradingService;
pub use verdict::{GradeKind, Verdict, parse_grader_output};

#[cfg(test)]
pub use grader::mock::MockGradingService;
