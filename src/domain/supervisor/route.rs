use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Worker chosen by the supervisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[serde(rename = "RAGWorkflow")]
    RagWorkflow,
    #[serde(rename = "ToolsWorkflow")]
    ToolsWorkflow,
    #[serde(rename = "FINISH")]
    Finish,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::RagWorkflow, Route::ToolsWorkflow, Route::Finish];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RagWorkflow => "RAGWorkflow",
            Self::ToolsWorkflow => "ToolsWorkflow",
            Self::Finish => "FINISH",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Route {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|route| route.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                DomainError::malformed_router_output(format!("unknown worker '{}'", trimmed))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_serde_names() {
        assert_eq!(serde_json::to_string(&Route::RagWorkflow).unwrap(), "\"RAGWorkflow\"");
        assert_eq!(serde_json::to_string(&Route::Finish).unwrap(), "\"FINISH\"");

        let parsed: Route = serde_json::from_str("\"ToolsWorkflow\"").unwrap();
        assert_eq!(parsed, Route::ToolsWorkflow);
    }

    #[test]
    fn test_route_from_str() {
        assert_eq!("RAGWorkflow".parse::<Route>().unwrap(), Route::RagWorkflow);
        assert_eq!(" finish ".parse::<Route>().unwrap(), Route::Finish);
        assert!(matches!(
            "Researcher".parse::<Route>(),
            Err(DomainError::MalformedRouterOutput { .. })
        ));
    }
}
