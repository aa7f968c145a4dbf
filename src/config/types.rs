use serde::Deserialize;

/// Default browser user agent presented to the catalog service
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36 Edg/114.0.1823.67";

/// Default catalog service origin
pub const DEFAULT_BASE_URL: &str = "https://gitstar.com.cn";

/// Main configuration structure for GitStar-Reflector
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub account: AccountConfig,
    pub agent: AgentConfig,
    pub endpoints: EndpointConfig,
    pub restriction: RestrictionConfig,
    pub notify: NotifyConfig,
    pub logging: LoggingConfig,
}

/// Credentials and request identity
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Personal token issued by the catalog service
    pub token: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("token", &mask_token(&self.token))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Worker pool behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Number of catalog pages to seed, within [1, 7]
    #[serde(rename = "work-pages")]
    pub work_pages: u32,

    /// Upper bound on concurrent workers
    #[serde(rename = "max-workers")]
    pub max_workers: u32,

    /// Per-request timeout applied by the HTTP client
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Skip the account limit pre-check entirely
    #[serde(rename = "skip-limit-check")]
    pub skip_limit_check: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            work_pages: 1,
            max_workers: 32,
            request_timeout_secs: 30,
            skip_limit_check: false,
        }
    }
}

/// Remote service location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Rules for recognising an account-restricted action response
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RestrictionConfig {
    /// Status code prefixes that mark the account as restricted
    #[serde(rename = "code-prefixes")]
    pub code_prefixes: Vec<String>,
}

impl Default for RestrictionConfig {
    fn default() -> Self {
        Self {
            code_prefixes: vec!["4".to_string()],
        }
    }
}

/// Post-run notification settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Webhook endpoints receiving the run digest
    pub servers: Vec<String>,

    /// Trailing log window included in the digest (minutes)
    #[serde(rename = "window-minutes")]
    pub window_minutes: f64,

    pub enabled: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            window_minutes: 45.0,
            enabled: true,
        }
    }
}

/// Structured log output
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// JSON-lines log file read back by the notifier
    #[serde(rename = "serialize-path")]
    pub serialize_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            serialize_path: "logs/serialize.log".to_string(),
        }
    }
}

/// Masks all but the last four characters of a token
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = token.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), visible)
}
