//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MetricsConfig;

static THREAD_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/v1/threads)/[^/]+").expect("valid thread path pattern"));

const MAX_PATH_LABEL: usize = 50;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match builder(config).and_then(PrometheusBuilder::install_recorder) {
        Ok(handle) => {
            gauge!("rag_supervisor_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!(path = %config.path, "Prometheus metrics initialized");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
                path: config.path.clone(),
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Prometheus metrics");
            None
        }
    }
}

fn builder(config: &MetricsConfig) -> Result<PrometheusBuilder, BuildError> {
    let builder = PrometheusBuilder::new();
    if config.duration_buckets.is_empty() {
        return Ok(builder);
    }
    builder.set_buckets_for_metric(
        Matcher::Suffix("duration_seconds".to_string()),
        &config.duration_buckets,
    )
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path.clone();
    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record one node execution of the RAG graph
pub fn record_graph_node(node: &str, success: bool, duration: Duration) {
    let status = if success { "success" } else { "error" };

    counter!("rag_graph_node_total", "node" => node.to_string(), "status" => status).increment(1);
    histogram!("rag_graph_node_duration_seconds", "node" => node.to_string())
        .record(duration.as_secs_f64());
}

/// Record how a graph run ended
pub fn record_graph_run(outcome: &str, duration: Duration) {
    counter!("rag_graph_runs_total", "outcome" => outcome.to_string()).increment(1);
    histogram!("rag_graph_run_duration_seconds").record(duration.as_secs_f64());
}

pub fn record_grader_verdict(grader: &str, verdict: &str) {
    counter!(
        "rag_grader_verdicts_total",
        "grader" => grader.to_string(),
        "verdict" => verdict.to_string()
    )
    .increment(1);
}

/// Record the worker chosen by the supervisor
pub fn record_route(route: &str) {
    counter!("rag_supervisor_routes_total", "route" => route.to_string()).increment(1);
}

/// Collapse thread ids so the path label stays low-cardinality
fn sanitize_path(path: &str) -> String {
    let path = THREAD_SEGMENT.replace(path, "$1/{thread_id}");

    if path.len() > MAX_PATH_LABEL {
        path.chars().take(MAX_PATH_LABEL).collect()
    } else {
        path.into_owned()
    }
}
