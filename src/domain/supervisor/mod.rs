//! Supervisor domain
//!
//! The supervisor picks which worker handles the latest user message.

mod route;
mod router;
mod tools;

pub use route::Route;
pub use router::{StaticRouter, SupervisorRouter};
pub use tools::ToolsWorkflow;

#[cfg(test)]
pub use router::mock::MockSupervisorRouter;
#[cfg(test)]
pub use tools::mock::MockToolsWorkflow;
