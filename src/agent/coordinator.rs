//! Worker pool coordinator
//!
//! This module seeds the shared queue with page tokens, spawns a fixed number
//! of workers over it and waits for every one of them to finish.

use crate::agent::action::RestrictionPolicy;
use crate::agent::report::RunReport;
use crate::agent::worker::{run_worker, WorkerContext};
use crate::agent::{PageToken, RunState};
use crate::api::{CatalogApi, HttpCatalogApi};
use crate::config::Config;
use crate::{AccountContext, ReflectorError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Runs the discovery/star pool
pub struct Coordinator {
    api: Arc<dyn CatalogApi>,
    policy: RestrictionPolicy,
    work_pages: u32,
    max_workers: u32,
}

impl Coordinator {
    /// Creates a coordinator over any catalog implementation
    ///
    /// # Arguments
    ///
    /// * `api` - The catalog service
    /// * `work_pages` - Number of pages to seed
    /// * `max_workers` - Concurrency cap; the pool uses `min(work_pages, max_workers)`
    pub fn new(api: Arc<dyn CatalogApi>, work_pages: u32, max_workers: u32) -> Self {
        Self {
            api,
            policy: RestrictionPolicy::default(),
            work_pages,
            max_workers: max_workers.max(1),
        }
    }

    pub fn with_policy(mut self, policy: RestrictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds an HTTP-backed coordinator from a resolved configuration
    pub fn from_config(config: &Config) -> Result<Self, ReflectorError> {
        let context = AccountContext::from_config(config)?;
        let api = HttpCatalogApi::new(
            context,
            Duration::from_secs(config.agent.request_timeout_secs),
        )?;

        Ok(Self::new(
            Arc::new(api),
            config.agent.work_pages,
            config.agent.max_workers,
        )
        .with_policy(RestrictionPolicy::from_config(&config.restriction)))
    }

    pub fn api(&self) -> Arc<dyn CatalogApi> {
        Arc::clone(&self.api)
    }

    /// Number of workers a run will spawn
    pub fn worker_count(&self) -> usize {
        self.work_pages.min(self.max_workers) as usize
    }

    /// Runs the pool to completion
    ///
    /// Every run gets a fresh queue and latch. All seed tokens are enqueued
    /// before the first worker starts so that no worker sees a transiently
    /// empty queue and exits early. Handler failures never fail the run.
    pub async fn run(&self) -> RunReport {
        let start_time = Instant::now();
        let state = Arc::new(RunState::new());

        let seeded = state.queue.enqueue_all(PageToken::seed(self.work_pages));
        let workers = self.worker_count();

        tracing::info!(pages = seeded, workers, "Starting star agent");

        let ctx = Arc::new(WorkerContext {
            api: Arc::clone(&self.api),
            state: Arc::clone(&state),
            policy: self.policy.clone(),
        });

        let mut pool = JoinSet::new();
        for id in 0..workers {
            pool.spawn(run_worker(id, Arc::clone(&ctx)));
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Worker task failed: {}", e);
            }
        }

        let report = RunReport {
            seeded_pages: seeded as u32,
            workers,
            outcomes: state.ledger.snapshot(),
            latch_tripped: state.latch.is_tripped(),
            remaining: state.queue.size(),
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            tasks = report.outcomes.len(),
            aborted = report.latch_tripped,
            "Star agent finished in {:?}",
            report.elapsed
        );

        report
    }
}
