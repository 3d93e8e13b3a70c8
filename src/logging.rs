// src/logging.rs

use crate::config::{get_config_dir, Config};
use crate::errors::{NexaError, NexaResult};
use flexi_logger::{detailed_format, FileSpec, Logger, LoggerHandle};

/// Starts file logging. The terminal belongs to the UI, so nothing goes to
/// stdout or stderr. Keep the returned handle alive for the whole run.
pub fn init_logging(config: &Config) -> NexaResult<LoggerHandle> {
    let dir = match &config.log_dir {
        Some(dir) => dir.clone(),
        None => get_config_dir()?.join("logs"),
    };

    Logger::try_with_str(&config.log_level)
        .map_err(|e| NexaError::config_error(format!("Invalid log level '{}': {}", config.log_level, e)))?
        .log_to_file(FileSpec::default().directory(dir).basename("nexa"))
        .format(detailed_format)
        .start()
        .map_err(|e| NexaError::config_error(format!("Failed to start logger: {}", e)))
}
