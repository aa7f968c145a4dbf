//! Account context shared read-only by every request of a run

use crate::config::{mask_token, Config, EndpointConfig};
use crate::ConfigError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, ORIGIN, REFERER, USER_AGENT};
use url::Url;

/// Credential, resolved headers and service origin for one run
///
/// Built once before the pool starts and never mutated afterwards.
#[derive(Clone)]
pub struct AccountContext {
    token: String,
    base_url: Url,
    headers: HeaderMap,
}

impl AccountContext {
    /// Resolves the header set for a token against the given endpoints
    ///
    /// # Returns
    ///
    /// * `Ok(AccountContext)` - Context ready to build a client from
    /// * `Err(ConfigError)` - The base URL or a header value is malformed
    pub fn new(
        token: &str,
        endpoints: &EndpointConfig,
        user_agent: &str,
    ) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&endpoints.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;
        let origin = base_url.origin().ascii_serialization();

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(user_agent)?);
        headers.insert(ORIGIN, header_value(&origin)?);
        headers.insert(REFERER, header_value(&origin)?);

        let mut authorization = header_value(&format!("token {}", token))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        Ok(Self {
            token: token.to_string(),
            base_url,
            headers,
        })
    }

    /// Builds the context from a resolved configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            &config.account.token,
            &config.endpoints,
            &config.account.user_agent,
        )
    }

    /// Headers attached to every outgoing request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Resolves an absolute API path against the service origin
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

impl std::fmt::Debug for AccountContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountContext")
            .field("token", &mask_token(&self.token))
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader(e.to_string()))
}
