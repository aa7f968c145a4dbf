//! GitStar-Reflector: a bulk star agent for the gitstar catalog
//!
//! This crate discovers repositories across catalog pages and stars each one
//! through a rate-limited API, stopping every pending request as soon as the
//! account is reported as restricted.

pub mod account;
pub mod agent;
pub mod api;
pub mod config;
pub mod logging;
pub mod notify;

use thiserror::Error;

/// Main error type for GitStar-Reflector operations
#[derive(Debug, Error)]
pub enum ReflectorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

/// Errors raised while talking to the catalog service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected payload from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] ::url::ParseError),
}

/// Result type alias for GitStar-Reflector operations
pub type Result<T> = std::result::Result<T, ReflectorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for catalog API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

// Re-export commonly used types
pub use account::{AccountContext, LimitStatus};
pub use agent::{ActionItem, Coordinator, PageToken, RunReport, Task};
pub use api::{CatalogApi, HttpCatalogApi};
pub use config::Config;
