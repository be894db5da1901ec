use clap::Parser;
use ferrous_resolve_application::use_cases::QueryDispatcher;
use ferrous_resolve_domain::CliOverrides;
use ferrous_resolve_jobs::{CacheHousekeepingJob, JobRunner, StatsReportJob};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "ferrous-resolve")]
#[command(version)]
#[command(about = "Ferrous Resolve - caching, blocking DNS forwarder")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// UDP listen port
    #[arg(short = 'u', long)]
    udp_port: Option<u16>,

    /// TCP listen port
    #[arg(short = 't', long)]
    tcp_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.bind.clone(),
            udp_port: self.udp_port,
            tcp_port: self.tcp_port,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous Resolve v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    let services = di::DnsServices::new(&config).await?;

    let mut handles =
        server::start_dns_server(&config.server, services.queue.clone(), shutdown.clone()).await?;

    let dispatcher = QueryDispatcher::new(Arc::clone(&services.engine));
    let receiver = services.receiver;
    let token = shutdown.clone();
    handles.push(tokio::spawn(async move {
        dispatcher.run(receiver, token).await;
    }));
    handles.push(tokio::spawn(services.collector.run(shutdown.clone())));

    if config.metrics.enabled {
        handles.push(
            server::start_metrics_server(
                &config.server,
                &config.metrics,
                services.metrics.clone(),
                shutdown.clone(),
            )
            .await?,
        );
    }

    let mut jobs = JobRunner::new()
        .with_stats_report(
            StatsReportJob::new(Arc::new(services.metrics))
                .with_interval(Duration::from_secs(config.logging.stats_interval_secs)),
        )
        .with_shutdown_token(shutdown.clone());
    if config.cache.enabled {
        jobs = jobs.with_cache_housekeeping(
            CacheHousekeepingJob::new(services.cache).with_interval(config.cache.prune_interval()),
        );
    }
    handles.extend(jobs.start().await);

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    shutdown.cancel();
    drop(services.queue);

    for handle in handles {
        if let Err(e) = handle.await {
            warn!(error = %e, "Task ended abnormally during shutdown");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
