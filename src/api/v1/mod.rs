//! Versioned thread API

pub mod threads;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/threads", post(threads::create_thread))
        .route(
            "/threads/{thread_id}",
            get(threads::get_thread).delete(threads::delete_thread),
        )
        .route("/threads/{thread_id}/messages", post(threads::send_message))
}
