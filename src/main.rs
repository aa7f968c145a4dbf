//! GitStar-Reflector main entry point
//!
//! This is the command-line interface for the bulk star agent.

use anyhow::Context;
use clap::Parser;
use gitstar_reflector::agent::{execute, print_summary};
use gitstar_reflector::config::{
    compute_config_hash, mask_token, resolve_config, validate, Config, NOTIFY_SERVER_PREFIX,
};
use gitstar_reflector::logging::init_logging;
use gitstar_reflector::notify::notify;
use std::path::{Path, PathBuf};

/// GitStar-Reflector: stars catalog repositories in bulk
///
/// Discovers repositories across catalog pages and stars each one, stopping
/// all pending work as soon as the account is reported as restricted. A digest
/// of the run log is pushed to the configured notification servers afterwards.
#[derive(Parser, Debug)]
#[command(name = "gitstar-reflector")]
#[command(version)]
#[command(about = "Bulk star agent for the gitstar catalog", long_about = None)]
struct Cli {
    /// Optional path to a TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Number of catalog pages to process (1-7)
    #[arg(long, value_name = "N")]
    pages: Option<u32>,

    /// Skip the account limit pre-check
    #[arg(long)]
    skip_limit_check: bool,

    /// Do not push the run digest to notification servers
    #[arg(long)]
    no_notify: bool,

    /// Validate the configuration and show what would run
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = resolve_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(pages) = cli.pages {
        config.agent.work_pages = pages;
        validate(&config).context("Invalid --pages value")?;
    }
    if cli.skip_limit_check {
        config.agent.skip_limit_check = true;
    }
    if cli.no_notify {
        config.notify.enabled = false;
    }

    let serialize_path = PathBuf::from(&config.logging.serialize_path);
    init_logging(cli.verbose, cli.quiet, &serialize_path)?;

    if let Some(path) = &cli.config {
        let hash = compute_config_hash(path)?;
        tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash);
    }
    if config.notify.servers.is_empty() {
        tracing::warn!(
            "No notification servers configured ({}* is empty); digest will not be pushed",
            NOTIFY_SERVER_PREFIX
        );
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_run(&config, &serialize_path).await
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== GitStar-Reflector Dry Run ===\n");

    println!("Account:");
    println!("  Token: {}", mask_token(&config.account.token));
    println!("  User agent: {}", config.account.user_agent);

    println!("\nAgent:");
    println!("  Work pages: {}", config.agent.work_pages);
    println!("  Max workers: {}", config.agent.max_workers);
    println!(
        "  Workers used: {}",
        config.agent.work_pages.min(config.agent.max_workers)
    );
    println!("  Request timeout: {}s", config.agent.request_timeout_secs);
    println!("  Limit check: {}", !config.agent.skip_limit_check);

    println!("\nEndpoints:");
    println!("  Base URL: {}", config.endpoints.base_url);
    println!(
        "  Restriction codes: {}",
        config.restriction.code_prefixes.join(", ")
    );

    println!("\nNotification ({} servers):", config.notify.servers.len());
    println!("  Enabled: {}", config.notify.enabled);
    println!("  Window: {} minutes", config.notify.window_minutes);
    println!("  Serialized log: {}", config.logging.serialize_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main run: pre-check, worker pool, then notification
async fn handle_run(config: &Config, serialize_path: &Path) -> anyhow::Result<()> {
    match execute(config).await {
        Ok(Some(report)) => print_summary(&report),
        Ok(None) => println!("Account is limited; no stars attempted"),
        Err(e) => {
            // A failed run is still reported through the digest
            tracing::error!("Run failed: {}", e);
            notify(&config.notify, serialize_path).await;
            return Err(e.into());
        }
    }

    notify(&config.notify, serialize_path).await;
    Ok(())
}
