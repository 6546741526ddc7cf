//! Local passage corpus

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{DomainError, Passage};

/// One indexed passage as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub source_id: String,
    pub text: String,
}

impl CorpusEntry {
    pub fn new(source_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            text: text.into(),
        }
    }

    pub fn to_passage(&self) -> Passage {
        Passage::new(self.text.clone(), self.source_id.clone())
    }
}

/// Load a JSON array of `{"source_id", "text"}` entries
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<CorpusEntry>, DomainError> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path).map_err(|e| {
        DomainError::configuration(format!("Failed to read corpus {}: {}", path.display(), e))
    })?;

    let entries: Vec<CorpusEntry> = serde_json::from_str(&raw).map_err(|e| {
        DomainError::configuration(format!("Invalid corpus {}: {}", path.display(), e))
    })?;

    let entries: Vec<CorpusEntry> = entries
        .into_iter()
        .filter(|entry| !entry.text.trim().is_empty())
        .collect();

    info!(path = %path.display(), passages = entries.len(), "Corpus loaded");

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_corpus() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"source_id": "a.md", "text": "Agents plan."}},
                {{"source_id": "b.md", "text": "   "}},
                {{"source_id": "c.md", "text": "Memory stores context."}}
            ]"#
        )
        .unwrap();

        let corpus = load_corpus(file.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[1], CorpusEntry::new("c.md", "Memory stores context."));
        assert_eq!(corpus[0].to_passage().source_id, "a.md");
    }

    #[test]
    fn test_load_missing_corpus() {
        let err = load_corpus("/nonexistent/corpus.json").unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_load_invalid_corpus() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "an array"}}"#).unwrap();

        assert!(load_corpus(file.path()).is_err());
    }
}
