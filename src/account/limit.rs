//! Account limit pre-check
//!
//! The check is advisory. The service endpoint is not always reliable, so an
//! error yields [`LimitStatus::Unknown`] and the run proceeds as if allowed.

use crate::api::CatalogApi;

/// Outcome of the account limit pre-check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStatus {
    /// The service reports the account may act
    Allowed,

    /// The service reports the account is restricted
    Blocked,

    /// The check failed or returned an unexpected payload
    Unknown,
}

impl LimitStatus {
    /// Whether the agent should run; `Unknown` is treated as allowed
    pub fn permits_run(self) -> bool {
        !matches!(self, LimitStatus::Blocked)
    }
}

/// Asks the service whether the account is currently limited
pub async fn check_account_limit(api: &dyn CatalogApi) -> LimitStatus {
    match api.check_limit().await {
        Ok(true) => {
            tracing::warn!(limit = true, "Account access is restricted, skipping run");
            LimitStatus::Blocked
        }
        Ok(false) => {
            tracing::info!(limit = false, "Account access status resolved");
            LimitStatus::Allowed
        }
        Err(e) => {
            tracing::warn!(err = %e, "Account status check failed, running optimistically");
            LimitStatus::Unknown
        }
    }
}
