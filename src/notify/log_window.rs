//! Reads back the trailing window of the serialized log

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One line of the JSON log as written by `tracing-subscriber`
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl LogEntry {
    pub fn message(&self) -> &str {
        self.fields
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// `LEVEL message key=value ...` with fields in key order
    pub fn render(&self) -> String {
        let mut line = format!("{} {}", self.level, self.message());
        let mut keys: Vec<&String> = self.fields.keys().filter(|k| *k != "message").collect();
        keys.sort();
        for key in keys {
            let value = match &self.fields[key.as_str()] {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            line.push_str(&format!(" {}={}", key, value));
        }
        line
    }
}

/// Parses one log line, returning `None` for anything that is not a log record
pub fn parse_line(line: &str) -> Option<LogEntry> {
    serde_json::from_str(line).ok()
}

/// Loads rendered entries newer than `now - window`
///
/// A missing file yields no entries. Unparseable lines are skipped. A window
/// reaching past the earliest representable time keeps every older entry.
pub fn load_recent_entries(
    path: &Path,
    window: Duration,
    now: DateTime<Utc>,
) -> std::io::Result<Vec<String>> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let cutoff = now
        .checked_sub_signed(window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut history = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if let Some(entry) = parse_line(&line) {
            if entry.timestamp > cutoff && entry.timestamp <= now {
                history.push(entry.render());
            }
        }
    }
    Ok(history)
}

/// Converts fractional minutes into a chrono duration, saturating at `Duration::MAX`
pub fn window_from_minutes(minutes: f64) -> Duration {
    // `as` saturates out-of-range floats; NaN becomes zero
    let millis = (minutes * 60_000.0).round() as i64;
    Duration::try_milliseconds(millis).unwrap_or(Duration::MAX)
}
