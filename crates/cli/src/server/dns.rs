use ferrous_resolve_application::use_cases::WorkQueue;
use ferrous_resolve_domain::ServerConfig;
use ferrous_resolve_infrastructure::dns::{TcpListenerTask, UdpListenerTask};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Bind the enabled listeners and spawn them. Bind failures are fatal.
pub async fn start_dns_server(
    config: &ServerConfig,
    queue: WorkQueue,
    shutdown: CancellationToken,
) -> anyhow::Result<Vec<JoinHandle<()>>> {
    let mut handles = Vec::new();

    if config.udp.enabled {
        let addr = config.socket_addr(config.udp.port)?;
        let listener = UdpListenerTask::bind(addr, queue.clone())
            .await
            .map_err(|e| anyhow::anyhow!("cannot bind UDP {}: {}", addr, e))?;
        handles.push(tokio::spawn(listener.run(shutdown.clone())));
    }

    if config.tcp.enabled {
        let addr = config.socket_addr(config.tcp.port)?;
        let listener = TcpListenerTask::bind(addr, queue)
            .await
            .map_err(|e| anyhow::anyhow!("cannot bind TCP {}: {}", addr, e))?
            .with_idle_timeout(config.tcp.idle_timeout());
        handles.push(tokio::spawn(listener.run(shutdown)));
    }

    info!(
        bind_address = %config.bind_address,
        udp = ?config.udp.enabled.then_some(config.udp.port),
        tcp = ?config.tcp.enabled.then_some(config.tcp.port),
        "DNS server ready"
    );

    Ok(handles)
}
