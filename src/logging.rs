//! Logging setup
//!
//! Two sinks are installed:
//! - the console, filtered by the CLI verbosity flags
//! - a JSON-lines file that the notifier reads back after the run

use crate::ReflectorError;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Filter applied to the serialized log regardless of console verbosity
const SERIALIZE_FILTER: &str = "gitstar_reflector=info";

/// Console filter for the given verbosity
pub fn console_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    match verbose {
        0 => EnvFilter::new("gitstar_reflector=info,warn"),
        1 => EnvFilter::new("gitstar_reflector=debug,info"),
        2 => EnvFilter::new("gitstar_reflector=trace,debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Installs the global subscriber
///
/// # Arguments
///
/// * `verbose` - Console verbosity (-v count)
/// * `quiet` - Only show errors on the console
/// * `serialize_path` - JSON-lines file receiving info-level agent events
pub fn init_logging(verbose: u8, quiet: bool, serialize_path: &Path) -> Result<(), ReflectorError> {
    let directory = match serialize_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = serialize_path.file_name().ok_or_else(|| {
        ReflectorError::Logging(format!(
            "serialize path '{}' has no file name",
            serialize_path.display()
        ))
    })?;
    std::fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_filter(console_filter(verbose, quiet));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(file_appender)
        .with_filter(EnvFilter::new(SERIALIZE_FILTER));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| ReflectorError::Logging(e.to_string()))
}
