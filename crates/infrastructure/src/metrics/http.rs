use super::resolver_metrics::PROMETHEUS_CONTENT_TYPE;
use super::ResolverMetrics;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::error;

/// Router serving the Prometheus text format at `route`.
pub fn metrics_router(metrics: ResolverMetrics, route: &str) -> Router {
    Router::new()
        .route(route, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<ResolverMetrics>) -> Response {
    match metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
