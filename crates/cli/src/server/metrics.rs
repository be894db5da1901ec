use ferrous_resolve_domain::{MetricsConfig, ServerConfig};
use ferrous_resolve_infrastructure::metrics::{metrics_router, ResolverMetrics};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Bind the scrape endpoint and serve it until shutdown. A bind failure is fatal.
pub async fn start_metrics_server(
    server: &ServerConfig,
    config: &MetricsConfig,
    metrics: ResolverMetrics,
    shutdown: CancellationToken,
) -> anyhow::Result<JoinHandle<()>> {
    let addr = server.socket_addr(config.port)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind metrics {}: {}", addr, e))?;

    info!(bind_address = %addr, route = %config.route, "Metrics endpoint ready");

    let app = metrics_router(metrics, &config.route);
    Ok(tokio::spawn(async move {
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await });
        if let Err(e) = serve.await {
            error!(error = %e, "Metrics server stopped");
        }
    }))
}
