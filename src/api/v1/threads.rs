//! Thread endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, Json, SendMessageRequest, ThreadCreatedResponse, ThreadResponse,
};
use crate::domain::{DomainError, ThreadId};
use crate::infrastructure::services::ConversationTurn;

fn parse_thread_id(raw: &str) -> Result<ThreadId, ApiError> {
    ThreadId::new(raw).map_err(|e| ApiError::from(DomainError::from(e)))
}

/// POST /v1/threads
pub async fn create_thread(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let checkpoint = state.conversation_service.create_thread().await?;

    Ok((
        StatusCode::CREATED,
        Json(ThreadCreatedResponse {
            thread_id: checkpoint.thread_id,
        }),
    ))
}

/// POST /v1/threads/{thread_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ConversationTurn>, ApiError> {
    let thread_id = parse_thread_id(&thread_id)?;
    debug!(thread_id = %thread_id, "Received message");

    let turn = state
        .conversation_service
        .send_message(&thread_id, &request.content)
        .await?;

    Ok(Json(turn))
}

/// GET /v1/threads/{thread_id}
pub async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> Result<Json<ThreadResponse>, ApiError> {
    let thread_id = parse_thread_id(&thread_id)?;

    state
        .conversation_service
        .get_thread(&thread_id)
        .await?
        .map(|checkpoint| Json(ThreadResponse::from(checkpoint)))
        .ok_or_else(|| {
            DomainError::not_found(format!("Thread '{}' not found", thread_id)).into()
        })
}

/// DELETE /v1/threads/{thread_id}
pub async fn delete_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let thread_id = parse_thread_id(&thread_id)?;

    if state.conversation_service.delete_thread(&thread_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DomainError::not_found(format!("Thread '{}' not found", thread_id)).into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::Request,
        Router,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::api::router::create_router;
    use crate::domain::graph::MockRagGraph;
    use crate::domain::{Route, StaticRouter};
    use crate::infrastructure::checkpoint::InMemoryCheckpointStore;
    use crate::infrastructure::services::ConversationService;

    fn app() -> Router {
        let service = ConversationService::new(
            Arc::new(InMemoryCheckpointStore::new()),
            Arc::new(StaticRouter(Route::RagWorkflow)),
            Arc::new(MockRagGraph::new("Agents use planning, memory and tools.")),
        );
        create_router(AppState::new(Arc::new(service)), None)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_thread_lifecycle() {
        let app = app();

        let response = app
            .clone()
            .oneshot(empty_request("POST", "/v1/threads"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let thread_id = body_json(response).await["thread_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/v1/threads/{}/messages", thread_id),
                serde_json::json!({ "content": "What makes up an agent?" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let turn = body_json(response).await;
        assert_eq!(turn["route"], "RAGWorkflow");
        assert_eq!(turn["reply"], "Agents use planning, memory and tools.");
        assert_eq!(turn["version"], 2);
        assert!(turn.get("error").is_none());

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/v1/threads/{}", thread_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let thread = body_json(response).await;
        assert_eq!(thread["messages"].as_array().unwrap().len(), 2);
        assert_eq!(thread["messages"][1]["role"], "assistant");

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/v1/threads/{}", thread_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(empty_request("GET", &format!("/v1/threads/{}", thread_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_message_to_new_thread_id_starts_thread() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/v1/threads/customer-42/messages",
                serde_json::json!({ "content": "hello" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let turn = body_json(response).await;
        assert_eq!(turn["thread_id"], "customer-42");
        assert_eq!(turn["version"], 1);
    }

    #[tokio::test]
    async fn test_empty_content_is_bad_request() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/v1/threads/t1/messages",
                serde_json::json!({ "content": "  " }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_invalid_thread_id_is_bad_request() {
        let response = app()
            .oneshot(empty_request("GET", "/v1/threads/not%20valid"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "invalid_thread_id");
    }

    #[tokio::test]
    async fn test_missing_content_field_is_json_error() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/v1/threads/t1/messages",
                serde_json::json!({ "text": "hello" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_delete_unknown_thread_is_not_found() {
        let response = app()
            .oneshot(empty_request("DELETE", "/v1/threads/missing"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
