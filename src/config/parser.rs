use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable carrying the account token
pub const TOKEN_ENV: &str = "GITSTAR_TOKEN";

/// Environment variable overriding the number of work pages
pub const WORK_PAGES_ENV: &str = "GITSTAR_WORK_PAGES";

/// Environment variable overriding the service origin
pub const BASE_URL_ENV: &str = "GITSTAR_BASE_URL";

/// Every variable with this prefix contributes a notification server
pub const NOTIFY_SERVER_PREFIX: &str = "APPRISE_";

/// Builds the run configuration: optional file, then environment, then validation
///
/// The file is never validated on its own; the token usually arrives through
/// `GITSTAR_TOKEN`.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use gitstar_reflector::config::resolve_config;
///
/// let config = resolve_config(Some(Path::new("reflector.toml"))).unwrap();
/// println!("Work pages: {}", config.agent.work_pages);
/// ```
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Fully resolved and validated configuration
/// * `Err(ConfigError)` - The file could not be read or the result is invalid
pub fn resolve_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config_file(path)?,
        None => Config::default(),
    };

    apply_env_overrides(&mut config, std::env::vars())?;
    validate(&config)?;
    Ok(config)
}

/// Applies environment overrides on top of a parsed configuration
///
/// Notification servers from `APPRISE_*` variables are appended in key order
/// after any servers listed in the file; empty values are ignored.
pub fn apply_env_overrides<I>(config: &mut Config, vars: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut servers: Vec<(String, String)> = Vec::new();

    for (key, value) in vars {
        match key.as_str() {
            TOKEN_ENV => {
                if !value.trim().is_empty() {
                    config.account.token = value.trim().to_string();
                }
            }
            WORK_PAGES_ENV => {
                config.agent.work_pages = value.trim().parse().map_err(|_| {
                    ConfigError::Validation(format!(
                        "{} must be an integer, got '{}'",
                        WORK_PAGES_ENV, value
                    ))
                })?;
            }
            BASE_URL_ENV => {
                if !value.trim().is_empty() {
                    config.endpoints.base_url = value.trim().to_string();
                }
            }
            _ if key.starts_with(NOTIFY_SERVER_PREFIX) => {
                if !value.trim().is_empty() {
                    servers.push((key, value.trim().to_string()));
                }
            }
            _ => {}
        }
    }

    servers.sort();
    config
        .notify
        .servers
        .extend(servers.into_iter().map(|(_, server)| server));

    Ok(())
}

/// Computes a SHA-256 hash of the configuration file content
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

fn parse_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}
