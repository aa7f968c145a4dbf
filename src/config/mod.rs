//! Configuration module for GitStar-Reflector
//!
//! This module handles loading the optional TOML configuration file, layering
//! environment variables on top of it, and validating the result.
//!
//! # Example
//!
//! ```no_run
//! use gitstar_reflector::config::resolve_config;
//!
//! let config = resolve_config(None).unwrap();
//! println!("Seeding {} pages", config.agent.work_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    mask_token, AccountConfig, AgentConfig, Config, EndpointConfig, LoggingConfig, NotifyConfig,
    RestrictionConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, resolve_config, BASE_URL_ENV,
    NOTIFY_SERVER_PREFIX, TOKEN_ENV, WORK_PAGES_ENV,
};
pub use validation::{validate, MAX_WINDOW_MINUTES, MAX_WORK_PAGES};
