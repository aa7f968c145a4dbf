//! HTTP implementation of the catalog API
//!
//! Responses are parsed from the body regardless of HTTP status: the service
//! reports restrictions inside the JSON payload, often alongside a 4xx status.

use super::{CatalogApi, StarResponse, CATALOG_TYPE, CHECK_LIMIT_PATH, LIST_PATH, STAR_PATH};
use crate::account::AccountContext;
use crate::agent::ActionItem;
use crate::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Builds an HTTP client carrying the account headers on every request
///
/// # Example
///
/// ```no_run
/// use gitstar_reflector::config::EndpointConfig;
/// use gitstar_reflector::account::AccountContext;
/// use gitstar_reflector::api::build_http_client;
/// use std::time::Duration;
///
/// let context = AccountContext::new("token", &EndpointConfig::default(), "Agent/1.0").unwrap();
/// let client = build_http_client(&context, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    context: &AccountContext,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .default_headers(context.headers().clone())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Catalog API over HTTP
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Client,
    context: AccountContext,
}

impl HttpCatalogApi {
    /// Creates the API with a freshly built client
    pub fn new(context: AccountContext, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&context, timeout)?;
        Ok(Self { client, context })
    }

    async fn post_json(&self, path: &str, payload: &Value) -> ApiResult<Value> {
        let url = self.context.endpoint(path)?;
        let response = self
            .client
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|source| ApiError::Http {
                url: url.to_string(),
                source,
            })?;
        read_json(url.as_str(), response).await
    }

    async fn get_json(&self, path: &str) -> ApiResult<Value> {
        let url = self.context.endpoint(path)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Http {
                url: url.to_string(),
                source,
            })?;
        read_json(url.as_str(), response).await
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_page(&self, page: u32) -> ApiResult<Vec<ActionItem>> {
        let body = self
            .post_json(LIST_PATH, &json!({ "page": page, "type": CATALOG_TYPE }))
            .await?;
        parse_listing(LIST_PATH, body)
    }

    async fn star(&self, item: &ActionItem) -> ApiResult<StarResponse> {
        let body = self
            .post_json(
                STAR_PATH,
                &json!({ "full_name": item.full_name, "type": CATALOG_TYPE }),
            )
            .await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode {
            url: STAR_PATH.to_string(),
            message: e.to_string(),
        })
    }

    async fn check_limit(&self) -> ApiResult<bool> {
        let body = self.get_json(CHECK_LIMIT_PATH).await?;
        body.pointer("/result/limit")
            .and_then(Value::as_bool)
            .ok_or_else(|| ApiError::Decode {
                url: CHECK_LIMIT_PATH.to_string(),
                message: "missing boolean result.limit".to_string(),
            })
    }
}

async fn read_json(url: &str, response: reqwest::Response) -> ApiResult<Value> {
    let text = response.text().await.map_err(|source| ApiError::Http {
        url: url.to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Extracts `result.datas[*]` as action items
///
/// A single malformed entry rejects the whole page so that a page is either
/// enqueued completely or not at all.
fn parse_listing(url: &str, body: Value) -> ApiResult<Vec<ActionItem>> {
    let entries = body
        .pointer("/result/datas")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::Decode {
            url: url.to_string(),
            message: "missing array result.datas".to_string(),
        })?;

    entries
        .iter()
        .map(|entry| {
            serde_json::from_value::<ActionItem>(entry.clone()).map_err(|e| ApiError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}
