//! Per-task outcomes and the run report

use crate::agent::{ActionItem, PageToken, Task};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// What happened to one dequeued task
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskOutcome {
    /// Listing page fetched; `enqueued` may be lower than `items` after an abort
    Discovered {
        page: PageToken,
        items: usize,
        enqueued: usize,
    },

    /// Listing page could not be fetched or parsed; dropped without retry
    DiscoveryFailed { page: PageToken, error: String },

    /// Star accepted by the service
    Starred { item: ActionItem },

    /// Service reported the account as restricted
    Restricted {
        item: ActionItem,
        code: Option<String>,
        msg: Option<String>,
    },

    /// Any other star failure; the run continues
    StarFailed { item: ActionItem, error: String },

    /// Dequeued just before the latch tripped and never dispatched
    Abandoned { task: Task },
}

impl TaskOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            TaskOutcome::Discovered { .. } => OutcomeKind::Discovered,
            TaskOutcome::DiscoveryFailed { .. } => OutcomeKind::DiscoveryFailed,
            TaskOutcome::Starred { .. } => OutcomeKind::Starred,
            TaskOutcome::Restricted { .. } => OutcomeKind::Restricted,
            TaskOutcome::StarFailed { .. } => OutcomeKind::StarFailed,
            TaskOutcome::Abandoned { .. } => OutcomeKind::Abandoned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeKind {
    Discovered,
    DiscoveryFailed,
    Starred,
    Restricted,
    StarFailed,
    Abandoned,
}

impl OutcomeKind {
    pub const ALL: [OutcomeKind; 6] = [
        OutcomeKind::Discovered,
        OutcomeKind::DiscoveryFailed,
        OutcomeKind::Starred,
        OutcomeKind::Restricted,
        OutcomeKind::StarFailed,
        OutcomeKind::Abandoned,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OutcomeKind::Discovered => "Pages discovered",
            OutcomeKind::DiscoveryFailed => "Pages missed",
            OutcomeKind::Starred => "Stars succeeded",
            OutcomeKind::Restricted => "Stars restricted",
            OutcomeKind::StarFailed => "Stars failed",
            OutcomeKind::Abandoned => "Tasks abandoned",
        }
    }
}

/// Append-only record of task outcomes shared by the workers of a run
#[derive(Debug, Default)]
pub struct OutcomeLedger {
    outcomes: Mutex<Vec<TaskOutcome>>,
}

impl OutcomeLedger {
    pub fn record(&self, outcome: TaskOutcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(outcome);
    }

    pub fn snapshot(&self) -> Vec<TaskOutcome> {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Summary of one pool run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Number of page tokens seeded
    pub seeded_pages: u32,

    /// Number of workers spawned
    pub workers: usize,

    /// Outcomes in completion order
    pub outcomes: Vec<TaskOutcome>,

    pub latch_tripped: bool,

    /// Entries left in the queue when the last worker finished
    pub remaining: usize,

    pub elapsed: Duration,
}

impl RunReport {
    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind() == kind).count()
    }

    /// Outcomes in a canonical order, independent of worker interleaving
    pub fn outcome_set(&self) -> Vec<TaskOutcome> {
        let mut outcomes = self.outcomes.clone();
        outcomes.sort();
        outcomes
    }

    /// Items that were starred successfully
    pub fn starred_items(&self) -> Vec<&ActionItem> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                TaskOutcome::Starred { item } => Some(item),
                _ => None,
            })
            .collect()
    }
}

/// Prints a run summary to stdout
pub fn print_summary(report: &RunReport) {
    println!("=== GitStar-Reflector Run Summary ===\n");
    println!("Pages seeded: {}", report.seeded_pages);
    println!("Workers: {}", report.workers);
    println!("Elapsed: {:.2}s", report.elapsed.as_secs_f64());
    println!();

    for kind in OutcomeKind::ALL {
        println!("  {:<18} {}", kind.label(), report.count(kind));
    }

    if report.latch_tripped {
        println!("\n⚠ Account restricted: remaining work was aborted");
    }
}
