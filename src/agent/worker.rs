//! Worker loop
//!
//! A worker dequeues one entry at a time and dispatches it by kind until it
//! finds the queue empty. There is no waiting: empty means done.

use crate::agent::action::{star_item, RestrictionPolicy};
use crate::agent::discovery::discover_page;
use crate::agent::report::TaskOutcome;
use crate::agent::{RunState, Task};
use crate::api::CatalogApi;
use std::sync::Arc;

/// Everything a worker shares with its siblings
pub(crate) struct WorkerContext {
    pub(crate) api: Arc<dyn CatalogApi>,
    pub(crate) state: Arc<RunState>,
    pub(crate) policy: RestrictionPolicy,
}

/// Runs one worker to completion and returns the number of tasks it handled
pub(crate) async fn run_worker(id: usize, ctx: Arc<WorkerContext>) -> usize {
    let mut handled = 0;

    while let Some(task) = ctx.state.queue.try_dequeue() {
        // The latch may trip between our dequeue and the dispatch below
        let outcome = if ctx.state.latch.is_tripped() {
            tracing::debug!(worker = id, task = ?task, "Run aborted, abandoning task");
            TaskOutcome::Abandoned { task }
        } else {
            match task {
                Task::Page(page) => discover_page(ctx.api.as_ref(), &ctx.state, page).await,
                Task::Star(item) => {
                    star_item(ctx.api.as_ref(), &ctx.state, &ctx.policy, item).await
                }
            }
        };

        ctx.state.ledger.record(outcome);
        handled += 1;
    }

    tracing::debug!(worker = id, handled, "Worker finished");
    handled
}
