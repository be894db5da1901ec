use ferrous_resolve_domain::{CliOverrides, Config};

/// Load, override and validate the configuration. Any error here is fatal.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
