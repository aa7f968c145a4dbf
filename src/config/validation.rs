use crate::config::parser::TOKEN_ENV;
use crate::config::types::{
    AccountConfig, AgentConfig, Config, EndpointConfig, NotifyConfig, RestrictionConfig,
};
use crate::ConfigError;
use url::Url;

/// Highest page index the catalog serves to a single account
pub const MAX_WORK_PAGES: u32 = 7;

/// Longest notification window accepted, one year
pub const MAX_WINDOW_MINUTES: f64 = 525_600.0;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_account_config(&config.account)?;
    validate_agent_config(&config.agent)?;
    validate_endpoint_config(&config.endpoints)?;
    validate_restriction_config(&config.restriction)?;
    validate_notify_config(&config.notify)?;
    Ok(())
}

fn validate_account_config(config: &AccountConfig) -> Result<(), ConfigError> {
    if config.token.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} is empty or missing",
            TOKEN_ENV
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_agent_config(config: &AgentConfig) -> Result<(), ConfigError> {
    if config.work_pages < 1 || config.work_pages > MAX_WORK_PAGES {
        return Err(ConfigError::Validation(format!(
            "work_pages must be between 1 and {}, got {}",
            MAX_WORK_PAGES, config.work_pages
        )));
    }

    if config.max_workers < 1 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be >= 1, got {}",
            config.max_workers
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

fn validate_endpoint_config(config: &EndpointConfig) -> Result<(), ConfigError> {
    validate_http_url("base_url", &config.base_url)
}

fn validate_restriction_config(config: &RestrictionConfig) -> Result<(), ConfigError> {
    if config.code_prefixes.is_empty() {
        return Err(ConfigError::Validation(
            "code_prefixes must list at least one prefix".to_string(),
        ));
    }

    if config.code_prefixes.iter().any(|p| p.is_empty()) {
        return Err(ConfigError::Validation(
            "code_prefixes cannot contain an empty prefix".to_string(),
        ));
    }

    Ok(())
}

fn validate_notify_config(config: &NotifyConfig) -> Result<(), ConfigError> {
    let minutes = config.window_minutes;
    if !minutes.is_finite() || minutes <= 0.0 || minutes > MAX_WINDOW_MINUTES {
        return Err(ConfigError::Validation(format!(
            "window_minutes must be in (0, {}], got {}",
            MAX_WINDOW_MINUTES, minutes
        )));
    }

    for server in &config.servers {
        Url::parse(server).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid notification server '{}': {}", server, e))
        })?;
    }

    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(())
}
