//! Request metrics for the thread API

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::infrastructure::observability::record_http_request;

/// Health, liveness and readiness checks are left out of request metrics
const HEALTH_ROUTES: [&str; 3] = ["/health", "/live", "/ready"];

/// Label used for requests that matched no route
const UNMATCHED_ROUTE: &str = "unmatched";

/// Record count, latency and status of every API request, labelled by route template
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let route = route_label(request.extensions().get::<MatchedPath>());
    if HEALTH_ROUTES.contains(&route.as_str()) {
        return next.run(request).await;
    }

    let start = Instant::now();
    let method = request.method().clone();
    let response = next.run(request).await;

    record_http_request(
        method.as_str(),
        &route,
        response.status().as_u16(),
        start.elapsed(),
    );

    response
}

/// Route template such as `/v1/threads/{thread_id}`; raw paths never become labels
fn route_label(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
