//! API request, response and error types

pub mod error;
pub mod json;
pub mod thread;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use thread::{SendMessageRequest, ThreadCreatedResponse, ThreadResponse};
