use anyhow::Context;
use anno_config::AnnoConfig;

/// Load layered configuration, reading `.env` from the working directory first.
pub fn load_config() -> anyhow::Result<AnnoConfig> {
    let config = AnnoConfig::load_with_dotenv().context("failed to load anno configuration")?;
    tracing::debug!(
        pretty = config.general.pretty,
        default_entity = %config.general.default_entity,
        "configuration loaded"
    );
    Ok(config)
}
