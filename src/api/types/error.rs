//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Error categories exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ServerError,
    ServiceUnavailableError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ServerError => write!(f, "server_error"),
            Self::ServiceUnavailableError => write!(f, "service_unavailable_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }

    /// Upstream model returned something unusable
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, ApiErrorType::ServerError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorType::ServiceUnavailableError,
            message,
        )
    }

    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::GATEWAY_TIMEOUT,
            ApiErrorType::ServiceUnavailableError,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NotFound { .. } => Self::not_found(message).with_code("not_found"),
            DomainError::Validation { .. } => {
                Self::bad_request(message).with_code("validation_error")
            }
            DomainError::InvalidId { .. } => {
                Self::bad_request(message).with_code("invalid_thread_id")
            }
            DomainError::Provider { .. } => Self::unavailable(message).with_code("provider_error"),
            DomainError::Timeout { .. } => Self::gateway_timeout(message).with_code("timeout"),
            DomainError::MalformedGraderOutput { .. } | DomainError::MalformedRouterOutput { .. } => {
                Self::bad_gateway(message).with_code("malformed_model_output")
            }
            DomainError::Storage { .. } => Self::unavailable(message).with_code("storage_error"),
            DomainError::Configuration { .. } => {
                Self::internal(message).with_code("configuration_error")
            }
            DomainError::Internal { .. } => Self::internal(message).with_code("internal_error"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status_codes() {
        let cases = [
            (DomainError::not_found("Thread 'x' not found"), StatusCode::NOT_FOUND),
            (DomainError::validation("empty"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("bad id"), StatusCode::BAD_REQUEST),
            (DomainError::provider("openai", "503"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::timeout("generator", 10), StatusCode::GATEWAY_TIMEOUT),
            (DomainError::malformed_router_output("?"), StatusCode::BAD_GATEWAY),
            (DomainError::storage("down"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain, status) in cases {
            assert_eq!(ApiError::from(domain).status, status);
        }
    }

    #[test]
    fn test_error_body_shape() {
        let err = ApiError::from(DomainError::invalid_id("Thread id contains invalid characters"));
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert_eq!(json["error"]["code"], "invalid_thread_id");
        assert_eq!(
            json["error"]["message"],
            "Invalid ID format: Thread id contains invalid characters"
        );
    }

    #[test]
    fn test_code_omitted_when_absent() {
        let json = serde_json::to_string(&ApiError::internal("x").response).unwrap();
        assert!(!json.contains("code"));
    }
}
