//! Verdict types and grader output parsing

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::completion::extract_json_object;

/// Binary grader outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Yes,
    No,
}

impl Verdict {
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which grader produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeKind {
    Relevance,
    Groundedness,
    Usefulness,
}

impl GradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Groundedness => "groundedness",
            Self::Usefulness => "usefulness",
        }
    }
}

impl fmt::Display for GradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a grader completion of the form `{"score": "yes" | "no"}`
///
/// Anything else is a hard error for the grading call.
pub fn parse_grader_output(kind: GradeKind, raw: &str) -> Result<Verdict, DomainError> {
    let json_str = extract_json_object(raw)
        .ok_or_else(|| malformed(kind, "no JSON object in output", raw))?;

    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| malformed(kind, &format!("invalid JSON: {}", e), raw))?;

    let score = value
        .get("score")
        .and_then(|s| s.as_str())
        .ok_or_else(|| malformed(kind, "missing string field 'score'", raw))?;

    match score.trim().to_ascii_lowercase().as_str() {
        "yes" => Ok(Verdict::Yes),
        "no" => Ok(Verdict::No),
        other => Err(malformed(
            kind,
            &format!("score must be 'yes' or 'no', got '{}'", other),
            raw,
        )),
    }
}

fn malformed(kind: GradeKind, reason: &str, raw: &str) -> DomainError {
    let excerpt: String = raw.chars().take(120).collect();
    DomainError::malformed_grader_output(kind.as_str(), format!("{} (output: {:?})", reason, excerpt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        assert_eq!(
            parse_grader_output(GradeKind::Relevance, r#"{"score": "yes"}"#).unwrap(),
            Verdict::Yes
        );
        assert_eq!(
            parse_grader_output(GradeKind::Relevance, r#"{"score": "no"}"#).unwrap(),
            Verdict::No
        );
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(
            parse_grader_output(GradeKind::Usefulness, r#"{"score": " YES "}"#).unwrap(),
            Verdict::Yes
        );
        assert_eq!(
            parse_grader_output(GradeKind::Usefulness, r#"{"score":"No"}"#).unwrap(),
            Verdict::No
        );
    }

    #[test]
    fn test_parse_with_surrounding_prose() {
        let raw = "Sure! ```json\n{\"score\": \"yes\", \"reason\": \"cited\"}\n``` Hope that helps.";
        assert_eq!(
            parse_grader_output(GradeKind::Groundedness, raw).unwrap(),
            Verdict::Yes
        );
    }

    #[test]
    fn test_parse_rejects_unparseable_text() {
        let err = parse_grader_output(GradeKind::Relevance, "definitely relevant").unwrap_err();
        match err {
            DomainError::MalformedGraderOutput { grader, .. } => assert_eq!(grader, "relevance"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_missing_score() {
        let err = parse_grader_output(GradeKind::Usefulness, r#"{"verdict": "yes"}"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedGraderOutput { .. }));
    }

    #[test]
    fn test_parse_rejects_non_binary_score() {
        let err = parse_grader_output(GradeKind::Groundedness, r#"{"score": "maybe"}"#).unwrap_err();
        assert!(err.to_string().contains("'maybe'"));

        let err = parse_grader_output(GradeKind::Groundedness, r#"{"score": 1}"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedGraderOutput { .. }));
    }

    #[test]
    fn test_parse_rejects_broken_json() {
        let err = parse_grader_output(GradeKind::Relevance, r#"{"score": yes}"#).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_malformed_output_is_not_transient() {
        let err = parse_grader_output(GradeKind::Relevance, "???").unwrap_err();
        assert!(!err.is_transient());
    }
}
