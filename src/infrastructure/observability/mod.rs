//! Observability infrastructure - Tracing and Prometheus metrics

mod metrics;
mod tracing_setup;

pub use metrics::{
    create_metrics_router, init_metrics, record_grader_verdict, record_graph_node,
    record_graph_run, record_http_request, record_route, PrometheusMetrics,
};
pub use tracing_setup::{init_tracing, shutdown_tracing};
