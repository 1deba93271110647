mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

/// Builds the process configuration: `.env`, then the optional YAML file at
/// `CONFIG_PATH`, then environment overrides, then validation.
pub async fn load() -> Result<Config> {
    load_from(Path::new(".env")).await
}

/// Same as [`load`], reading the dotenv file from `dotenv_path`. Variables
/// already present in the environment are not overwritten by it.
pub async fn load_from(dotenv_path: &Path) -> Result<Config> {
    load_dotenv(dotenv_path)?;

    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_file(&config_path).await?;

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

fn load_dotenv(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::config(format!("Failed to load .env file: {}", e))),
    }
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_file(path: &str) -> Result<Config> {
    if !tokio::fs::try_exists(path).await? {
        debug!("No configuration file at {}, using defaults", path);
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(project_id) = lookup("DIALOGFLOW_PROJECT_ID") {
        config.dialogflow.project_id = project_id;
    }
    if let Some(credentials) = lookup("GOOGLE_CREDENTIALS_JSON") {
        config.dialogflow.credentials_json = credentials;
    }
    if let Some(api_key) = lookup("OPENAI_API_KEY") {
        config.llm.api_key = api_key;
    }
    if let Some(base_url) = lookup("OPENAI_BASE_URL") {
        config.llm.base_url = base_url;
    }
    if let Some(host) = lookup("SERVER_HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("SERVER_PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid SERVER_PORT: '{}'", port)))?;
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.dialogflow.project_id.trim().is_empty() {
            return Err(Error::config(
                "Dialogflow project id is required (DIALOGFLOW_PROJECT_ID)",
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(Error::config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }
        if self.llm.max_tokens == 0 {
            return Err(Error::config("LLM max_tokens must be greater than zero"));
        }
        Ok(())
    }
}
