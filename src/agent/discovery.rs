//! Discovery handler: turns a page token into action items

use crate::agent::report::TaskOutcome;
use crate::agent::{PageToken, RunState};
use crate::api::CatalogApi;

/// Fetches one listing page and enqueues every entry on it
///
/// Failures are logged and the page is dropped; they never touch the latch.
pub async fn discover_page(api: &dyn CatalogApi, state: &RunState, page: PageToken) -> TaskOutcome {
    match api.list_page(page.page()).await {
        Ok(items) => {
            let found = items.len();
            let enqueued = state.queue.enqueue_all(items);

            if enqueued < found {
                tracing::debug!(
                    page = page.page(),
                    dropped = found - enqueued,
                    "Run aborted, discarding discovered items"
                );
            }

            tracing::info!(
                page = page.page(),
                items = found,
                remain = state.queue.size(),
                "🔗 Fetched catalog page"
            );

            TaskOutcome::Discovered {
                page,
                items: found,
                enqueued,
            }
        }
        Err(e) => {
            tracing::error!(missed_page = page.page(), err = %e, "📛 Failed to fetch catalog page");
            TaskOutcome::DiscoveryFailed {
                page,
                error: e.to_string(),
            }
        }
    }
}
