//! Star agent: the concurrent discovery/action worker pool
//!
//! This module contains the core of the crate:
//! - A shared FIFO queue mixing page tokens and action items
//! - A one-shot abort latch that drains the queue on account restriction
//! - Discovery and action handlers
//! - The worker loop and the pool coordinator

mod action;
mod coordinator;
mod discovery;
mod latch;
mod queue;
mod report;
mod task;
mod worker;


pub use action::{star_item, RestrictionPolicy};
pub use coordinator::Coordinator;
pub use discovery::discover_page;
pub use latch::{AbortLatch, Trip};
pub use queue::TaskQueue;
pub use report::{print_summary, OutcomeKind, OutcomeLedger, RunReport, TaskOutcome};
pub use task::{ActionItem, PageToken, Task};

use crate::account::check_account_limit;
use crate::config::Config;
use crate::ReflectorError;

/// Run-scoped state shared by every worker of one pool run
#[derive(Debug, Default)]
pub struct RunState {
    pub queue: TaskQueue,
    pub latch: AbortLatch,
    pub ledger: OutcomeLedger,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Runs the agent for a resolved configuration
///
/// This is the main entry point for a run. It will:
/// 1. Build the account context and HTTP client
/// 2. Check the account limit (unless disabled); `Unknown` counts as allowed
/// 3. Run the worker pool
///
/// # Returns
///
/// * `Ok(Some(RunReport))` - The pool ran
/// * `Ok(None)` - The account is limited; nothing was attempted
/// * `Err(ReflectorError)` - The client could not be built
pub async fn execute(config: &Config) -> Result<Option<RunReport>, ReflectorError> {
    let coordinator = Coordinator::from_config(config)?;

    if !config.agent.skip_limit_check {
        let status = check_account_limit(coordinator.api().as_ref()).await;
        if !status.permits_run() {
            return Ok(None);
        }
    }

    Ok(Some(coordinator.run().await))
}
