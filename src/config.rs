use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_COPY_FEEDBACK_MS, DEFAULT_ENDPOINT, DEFAULT_REVEAL_TICK_MS,
};
use crate::errors::{NexaError, NexaResult};
use once_cell::sync::Lazy;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub reveal_tick_ms: u64,
    pub copy_feedback_ms: u64,
    pub connect_timeout_secs: u64,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reveal_tick_ms: DEFAULT_REVEAL_TICK_MS,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn reveal_tick(&self) -> Duration {
        Duration::from_millis(self.reveal_tick_ms)
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Applies `NEXA_ENDPOINT` and `NEXA_LOG_LEVEL` on top of the file values.
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = env::var("NEXA_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.endpoint = endpoint.trim().to_string();
            }
        }
        if let Ok(level) = env::var("NEXA_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.log_level = level.trim().to_string();
            }
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> NexaResult<()> {
    let config_path = get_config_path()?;
    let mut config = load_or_create(&config_path)?;
    config.apply_env_overrides();
    validate_config(&config)?;

    store(config);
    Ok(())
}

/// Reads the config at `path`, writing defaults there first if it's missing.
pub fn load_or_create(path: &Path) -> NexaResult<Config> {
    if path.exists() {
        let config_str = fs::read_to_string(path)
            .map_err(|e| NexaError::config_error(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&config_str)
            .map_err(|e| NexaError::config_error(format!("Failed to parse config: {}", e)))
    } else {
        let config = Config::default();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                NexaError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }
        write_config(path, &config)?;
        Ok(config)
    }
}

fn write_config(path: &Path, config: &Config) -> NexaResult<()> {
    let config_str = serde_json::to_string_pretty(config)
        .map_err(|e| NexaError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, config_str)
        .map_err(|e| NexaError::config_error(format!("Failed to write config file: {}", e)))
}

pub fn get_config_dir() -> NexaResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| NexaError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("nexa"))
}

fn get_config_path() -> NexaResult<PathBuf> {
    Ok(get_config_dir()?.join("config.json"))
}

pub fn validate_config(config: &Config) -> NexaResult<()> {
    let url = Url::parse(&config.endpoint)
        .map_err(|e| NexaError::config_error(format!("Invalid endpoint '{}': {}", config.endpoint, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(NexaError::config_error(format!(
            "Endpoint must be http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.reveal_tick_ms == 0 {
        return Err(NexaError::config_error("reveal_tick_ms must be greater than 0"));
    }

    if config.copy_feedback_ms == 0 {
        return Err(NexaError::config_error("copy_feedback_ms must be greater than 0"));
    }

    if config.connect_timeout_secs == 0 {
        return Err(NexaError::config_error("connect_timeout_secs must be greater than 0"));
    }

    if config.log_level.trim().is_empty() {
        return Err(NexaError::config_error("log_level is required"));
    }

    Ok(())
}

fn store(config: Config) {
    match CONFIG.write() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

pub fn get_config() -> Config {
    match CONFIG.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_endpoint() {
        let mut config = Config::default();
        config.endpoint = "not a url".to_string();
        assert!(validate_config(&config).is_err());

        config.endpoint = "ftp://example.com/chat".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_durations() {
        let mut config = Config::default();
        config.reveal_tick_ms = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.copy_feedback_ms = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.connect_timeout_secs = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("connect_timeout_secs"));
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = load_or_create(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reread = load_or_create(&path).unwrap();
        assert_eq!(reread, config);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "endpoint": "http://localhost:8080/chat" }"#).unwrap();

        let config = load_or_create(&path).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/chat");
        assert_eq!(config.reveal_tick(), Duration::from_millis(10));
        assert_eq!(config.copy_feedback(), Duration::from_millis(2000));
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();

        assert!(matches!(load_or_create(&path), Err(NexaError::Config(_))));
    }
}
