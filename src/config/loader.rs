// Configuration loader
// Defaults, then ~/.parenting-assistant/config.toml (or --config), then environment

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;
use crate::errors::config_parse_error;

/// Load configuration from the config file and the process environment
///
/// A `.env` file in the working directory is read first when present, so
/// local development can keep the API key out of the shell profile.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    load_config_from(path.as_deref(), |key| std::env::var(key).ok())
}

/// Default config location: ~/.parenting-assistant/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".parenting-assistant/config.toml"))
}

/// Load configuration with an injectable environment lookup
pub fn load_config_from<F>(path: Option<&Path>, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };

    apply_env_overrides(&mut config, env)?;

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow!(config_parse_error(&path.display().to_string(), &e.to_string())))?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut Config, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(port) = var("PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
    }
    if let Some(host) = var("HOST") {
        config.server.host = host;
    }
    if let Some(api_key) = var("OPENAI_API_KEY") {
        config.generator.api_key = Some(api_key);
    }
    if let Some(base_url) = var("OPENAI_BASE_URL") {
        config.generator.base_url = base_url;
    }
    if let Some(model) = var("OPENAI_MODEL") {
        config.generator.model = model;
    }

    Ok(())
}
