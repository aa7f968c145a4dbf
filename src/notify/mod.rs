//! Post-run notification
//!
//! After a run, the trailing window of the serialized log is condensed into a
//! digest and pushed to every configured webhook. Delivery is best effort:
//! failures are logged and never change the outcome of the run.

mod digest;
mod log_window;

pub use digest::{compose_digest, Digest, DIGEST_TITLE};
pub use log_window::{load_recent_entries, parse_line, window_from_minutes, LogEntry};

use crate::config::NotifyConfig;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

/// Delivery counts for one notification round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Posts a digest to each server
pub async fn send_digest(client: &Client, servers: &[String], digest: &Digest) -> NotifyReport {
    let mut report = NotifyReport::default();

    for server in servers {
        let result = client
            .post(server.as_str())
            .json(digest)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => report.delivered += 1,
            Err(e) => {
                tracing::warn!(server = %server, err = %e, "Failed to push notification");
                report.failed += 1;
            }
        }
    }

    report
}

/// Reads the trailing log window and pushes the digest to every server
///
/// Never fails: an unreadable log still produces a header-only digest.
pub async fn notify(config: &NotifyConfig, log_path: &Path) -> NotifyReport {
    if !config.enabled || config.servers.is_empty() {
        tracing::debug!("Notification disabled or no servers configured");
        return NotifyReport::default();
    }

    let window = window_from_minutes(config.window_minutes);
    let lines = match load_recent_entries(log_path, window, chrono::Utc::now()) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(path = %log_path.display(), err = %e, "Failed to read serialized log");
            Vec::new()
        }
    };

    let client = match Client::builder().timeout(Duration::from_secs(15)).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(err = %e, "Failed to build notification client");
            return NotifyReport {
                delivered: 0,
                failed: config.servers.len(),
            };
        }
    };

    let digest = compose_digest(&lines);
    let report = send_digest(&client, &config.servers, &digest).await;

    tracing::info!(
        delivered = report.delivered,
        failed = report.failed,
        motive = "NOTIFY",
        "Notification push finished"
    );
    report
}
