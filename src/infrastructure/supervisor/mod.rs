//! Supervisor router and worker implementations

mod http_tools;
mod llm_router;

pub use http_tools::HttpToolsWorkflow;
pub use llm_router::LlmSupervisorRouter;
