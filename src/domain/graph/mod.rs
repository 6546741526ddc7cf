//! RAG control graph domain
//!
//! Node identifiers, typed routing decisions, run results and the executor trait. The
//! executor itself lives in the infrastructure layer.

mod config;
mod decision;
mod error;
mod executor;
mod node;
mod run;

pub use config::{EmptyRetrievalPolicy, GraphConfig, RetryConfig};
pub use decision::{DocumentsDecision, GenerationDecision, documents_flag, grade_outcome};
pub use error::GraphError;
pub use executor::RagGraph;
pub use node::{GraphNode, NextStep};
pub use run::{GraphRun, NodeExecution, RunOutcome};

#[cfg(test)]
pub use executor::mock::MockRagGraph;
