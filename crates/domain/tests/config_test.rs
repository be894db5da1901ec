use ferrous_resolve_domain::{CliOverrides, Config, ConfigError, UpstreamStrategy};
use std::io::Write;
use std::time::Duration;

const FULL_CONFIG: &str = r#"
[server]
bind_address = "127.0.0.1"
[server.udp]
enabled = true
port = 5353
[server.tcp]
enabled = false
port = 5353

[upstream]
strategy = "latency"
[[upstream.servers]]
name = "cloudflare"
ip = "1.1.1.1"
port = 53
timeout_ms = 1500
[[upstream.servers]]
name = "quad9"
ip = "9.9.9.9"

[blocklist]
local = ["blocklists/ads.toml"]
remote = ["https://example.org/list.txt"]

[cache]
enabled = true
prune_interval_ms = 500
max_cname_depth = 4
[[cache.local_records]]
domain = "router.lan"
type = "A"
value = "192.168.1.1"
ttl = 300

[engine]
queue_size = 64
enqueue_timeout_ms = 10

[logging]
level = "debug"
stats_interval_secs = 0

[metrics]
port = 9153
route = "/prom"
"#;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();

    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.server.udp.port, 53);
    assert!(config.server.tcp.enabled);
    assert_eq!(config.upstream.strategy, UpstreamStrategy::RoundRobin);
    assert!(!config.upstream.servers.is_empty());
    assert!(config.cache.enabled);
    assert_eq!(config.cache.prune_interval_ms, 1000);
    assert_eq!(config.cache.max_cname_depth, 8);
    assert_eq!(config.engine.queue_size, 256);
    assert_eq!(config.engine.enqueue_timeout_ms, 50);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.stats_interval_secs, 60);
    assert!(config.validate().is_ok());
}

#[test]
fn test_full_config_parses() {
    let config = Config::from_toml(FULL_CONFIG).unwrap();

    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.server.udp.port, 5353);
    assert!(!config.server.tcp.enabled);
    assert_eq!(config.upstream.strategy, UpstreamStrategy::Latency);
    assert_eq!(config.upstream.servers.len(), 2);
    assert_eq!(config.upstream.servers[0].timeout_ms, 1500);
    assert_eq!(config.upstream.servers[1].port, 53);
    assert_eq!(config.upstream.servers[1].timeout_ms, 2000);
    assert_eq!(config.blocklist.source_count(), 2);
    assert_eq!(config.cache.max_cname_depth, 4);
    assert_eq!(config.cache.local_records.len(), 1);
    assert_eq!(config.cache.local_records[0].record_type, "A");
    assert_eq!(config.engine.queue_size, 64);
    assert_eq!(config.logging.stats_interval_secs, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_config_falls_back_to_defaults() {
    let config = Config::from_toml(
        r#"
        [upstream]
        strategy = "sequential"
        "#,
    )
    .unwrap();

    assert_eq!(config.upstream.strategy, UpstreamStrategy::Sequential);
    assert_eq!(config.upstream.servers.len(), 2);
    assert_eq!(config.engine.queue_size, 256);
}

#[test]
fn test_unknown_strategy_is_parse_error() {
    let result = Config::from_toml(
        r#"
        [upstream]
        strategy = "fastest"
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validation_rejects_empty_upstreams() {
    let mut config = Config::default();
    config.upstream.servers.clear();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validation_rejects_bad_upstream_ip() {
    let mut config = Config::default();
    config.upstream.servers[0].ip = "one.one.one.one".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validation_rejects_bad_bind_address() {
    let mut config = Config::default();
    config.server.bind_address = "localhost".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    config.server.bind_address = "::".to_string();
    assert_eq!(config.server.socket_addr(53).unwrap().to_string(), "[::]:53");
}

#[test]
fn test_tcp_idle_timeout_is_configurable() {
    let config = Config::from_toml(
        r#"
[server.tcp]
port = 5353
idle_timeout_ms = 2500
"#,
    )
    .unwrap();
    assert_eq!(config.server.tcp.idle_timeout(), Duration::from_millis(2500));
    assert_eq!(Config::default().server.tcp.idle_timeout_ms, 10_000);

    let mut config = Config::default();
    config.server.tcp.idle_timeout_ms = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validation_requires_a_protocol() {
    let mut config = Config::default();
    config.server.udp.enabled = false;
    config.server.tcp.enabled = false;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_zero_port_on_enabled_protocol() {
    let mut config = Config::default();
    config.server.tcp.port = 0;
    assert!(config.validate().is_err());

    config.server.tcp.enabled = false;
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_rejects_zero_queue_and_depth() {
    let mut config = Config::default();
    config.engine.queue_size = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.cache.max_cname_depth = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_bad_local_record() {
    let mut config = Config::from_toml(FULL_CONFIG).unwrap();
    config.cache.local_records[0].value = "999.1.1.1".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_metrics_section() {
    let config = Config::from_toml(FULL_CONFIG).unwrap();
    assert!(config.metrics.enabled);
    assert_eq!(config.metrics.port, 9153);
    assert_eq!(config.metrics.route, "/prom");
    assert!(config.validate().is_ok());

    let defaults = Config::default();
    assert_eq!(defaults.metrics.port, 9090);
    assert_eq!(defaults.metrics.route, "/metrics");

    let mut config = Config::default();
    config.metrics.route = "metrics".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    config.metrics.enabled = false;
    assert!(config.validate().is_ok());
}

#[test]
fn test_local_records_require_the_cache() {
    let mut config = Config::from_toml(FULL_CONFIG).unwrap();
    config.cache.enabled = false;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    config.cache.local_records.clear();
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_from_explicit_path_with_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FULL_CONFIG.as_bytes()).unwrap();

    let overrides = CliOverrides {
        bind_address: Some("0.0.0.0".to_string()),
        udp_port: Some(10053),
        tcp_port: None,
        log_level: Some("warn".to_string()),
    };
    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.server.udp.port, 10053);
    assert_eq!(config.server.tcp.port, 5353);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_load_missing_file_is_read_error() {
    let result = Config::load(Some("/nonexistent/ferrous-resolve.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}
