use crate::config::types::{Config, OutputConfig, SourceConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Longest politeness delay accepted (milliseconds)
const MAX_POLITENESS_DELAY: u64 = 60_000;

/// Longest request timeout accepted (seconds)
const MAX_REQUEST_TIMEOUT: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the source section
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;
    validate_http_url("start-url", &config.start_url)?;

    if config.politeness_delay > MAX_POLITENESS_DELAY {
        return Err(ConfigError::Validation(format!(
            "politeness-delay must be <= {}ms, got {}ms",
            MAX_POLITENESS_DELAY, config.politeness_delay
        )));
    }

    if config.request_timeout < 1 || config.request_timeout > MAX_REQUEST_TIMEOUT {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be between 1 and {} seconds, got {}",
            MAX_REQUEST_TIMEOUT, config.request_timeout
        )));
    }

    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
