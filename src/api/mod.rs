//! Catalog service API
//!
//! This module defines the seam between the worker pool and the remote
//! service:
//! - [`CatalogApi`]: the three calls the agent needs (listing, star, limit check)
//! - [`StarResponse`]: the loosely-typed action payload and its classification
//! - [`HttpCatalogApi`]: the reqwest-backed implementation

mod http;

pub use http::{build_http_client, HttpCatalogApi};

use crate::agent::ActionItem;
use crate::ApiResult;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Path of the paginated repository listing
pub const LIST_PATH: &str = "/api/repos";

/// Path of the star action
pub const STAR_PATH: &str = "/api/upload_star";

/// Path of the account limit check
pub const CHECK_LIMIT_PATH: &str = "/api/check_limit";

/// Catalog type selector sent with listing and action requests
pub const CATALOG_TYPE: u8 = 1;

/// Remote operations used by the agent
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one listing page and returns its entries as action items
    async fn list_page(&self, page: u32) -> ApiResult<Vec<ActionItem>>;

    /// Stars one repository and returns the raw response
    async fn star(&self, item: &ActionItem) -> ApiResult<StarResponse>;

    /// Returns `true` when the service reports the account as limited
    async fn check_limit(&self) -> ApiResult<bool>;
}

/// Response body of the star action
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StarResponse {
    /// Boolean-ish success indicator
    #[serde(default)]
    pub result: Value,

    /// Status code on failure, e.g. `"403_restricted"`
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: Option<String>,

    #[serde(default)]
    pub msg: Option<String>,
}

impl StarResponse {
    /// Whether the success indicator is present and truthy
    pub fn is_success(&self) -> bool {
        is_truthy(&self.result)
    }
}

/// Truthiness of a loosely-typed JSON field
///
/// `null`, `false`, zero, and empty strings, arrays and objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

// The service sends the code as a string, but numeric codes are accepted too.
fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
