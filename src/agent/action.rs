//! Action handler: stars one repository and detects account restriction

use crate::agent::report::TaskOutcome;
use crate::agent::{ActionItem, RunState};
use crate::api::{CatalogApi, StarResponse};
use crate::config::RestrictionConfig;

/// Decides whether a failed star response means the account is restricted
///
/// The service marks restriction with a client-error status code inside the
/// payload; the accepted prefixes come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionPolicy {
    code_prefixes: Vec<String>,
}

impl RestrictionPolicy {
    pub fn new<I, S>(code_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code_prefixes: code_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &RestrictionConfig) -> Self {
        Self::new(config.code_prefixes.iter().cloned())
    }

    /// No success indicator and a code matching one of the prefixes
    pub fn is_restricted(&self, response: &StarResponse) -> bool {
        if response.is_success() {
            return false;
        }
        match response.code.as_deref() {
            Some(code) => self
                .code_prefixes
                .iter()
                .any(|prefix| code.starts_with(prefix.as_str())),
            None => false,
        }
    }
}

impl Default for RestrictionPolicy {
    fn default() -> Self {
        Self::from_config(&RestrictionConfig::default())
    }
}

/// Stars one item, tripping the abort latch if the account is restricted
pub async fn star_item(
    api: &dyn CatalogApi,
    state: &RunState,
    policy: &RestrictionPolicy,
    item: ActionItem,
) -> TaskOutcome {
    let response = match api.star(&item).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(full_name = %item.full_name, err = %e, "📛 Star request failed");
            return TaskOutcome::StarFailed {
                item,
                error: e.to_string(),
            };
        }
    };

    if response.is_success() {
        tracing::info!(
            full_name = %item.full_name,
            remain = state.queue.size(),
            "🌟 Starred repository"
        );
        return TaskOutcome::Starred { item };
    }

    if policy.is_restricted(&response) {
        let trip = state.latch.trip_and_drain(&state.queue);
        if trip.first {
            tracing::warn!(
                drained = trip.drained,
                code = response.code.as_deref().unwrap_or_default(),
                "Account restricted, aborting all pending tasks"
            );
        }
        tracing::error!(
            full_name = %item.full_name,
            code = response.code.as_deref().unwrap_or_default(),
            msg = response.msg.as_deref().unwrap_or_default(),
            "📛 Star failed: account restricted"
        );
        return TaskOutcome::Restricted {
            item,
            code: response.code,
            msg: response.msg,
        };
    }

    let error = format!(
        "unexpected response: code={} msg={}",
        response.code.as_deref().unwrap_or("-"),
        response.msg.as_deref().unwrap_or("-")
    );
    tracing::error!(full_name = %item.full_name, err = %error, "📛 Star failed");
    TaskOutcome::StarFailed { item, error }
}
