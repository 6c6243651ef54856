use crate::config::types::{Config, CrawlerConfig, HttpConfig};
use crate::ConfigError;

/// Longest backoff step accepted (one minute)
const MAX_BACKOFF_UNIT_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.start_url.is_empty() {
        return Err(ConfigError::Validation(
            "start_url cannot be empty".to_string(),
        ));
    }

    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.retries < 1 {
        return Err(ConfigError::Validation(format!(
            "retries must be >= 1, got {}",
            config.retries
        )));
    }

    if config.backoff_unit_ms > MAX_BACKOFF_UNIT_MS {
        return Err(ConfigError::Validation(format!(
            "backoff_unit_ms must be <= {}ms, got {}ms",
            MAX_BACKOFF_UNIT_MS, config.backoff_unit_ms
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs ({}) cannot exceed timeout_secs ({})",
            config.connect_timeout_secs, config.timeout_secs
        )));
    }

    Ok(())
}
