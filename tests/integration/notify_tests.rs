//! Integration tests for the post-run notifier

use chrono::{Duration, SecondsFormat, Utc};
use gitstar_reflector::config::NotifyConfig;
use gitstar_reflector::notify::{notify, NotifyReport, DIGEST_TITLE};
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn log_line(age: Duration, message: &str) -> String {
    let timestamp = (Utc::now() - age).to_rfc3339_opts(SecondsFormat::Micros, true);
    format!(
        r#"{{"timestamp":"{}","level":"INFO","fields":{{"message":"{}","full_name":"octo/one"}},"target":"gitstar_reflector::agent"}}"#,
        timestamp, message
    )
}

fn write_log(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_digest_contains_recent_lines_only() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let log = write_log(&[
        log_line(Duration::hours(3), "stale run"),
        log_line(Duration::minutes(5), "fresh star"),
    ]);
    let config = NotifyConfig {
        servers: vec![format!("{}/hook", mock_server.uri())],
        ..Default::default()
    };

    let report = notify(&config, log.path()).await;
    assert_eq!(
        report,
        NotifyReport {
            delivered: 1,
            failed: 0
        }
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(payload["title"], DIGEST_TITLE);
    assert_eq!(payload["format"], "markdown");

    let body = payload["body"].as_str().unwrap();
    assert!(body.starts_with("--------运行日志--------"));
    assert!(body.contains("INFO fresh star full_name=octo/one"));
    assert!(!body.contains("stale run"));
}

#[tokio::test]
async fn test_failed_server_does_not_stop_others() {
    let failing = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&failing)
        .await;

    let healthy = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&healthy)
        .await;

    let log = write_log(&[log_line(Duration::minutes(1), "done")]);
    let config = NotifyConfig {
        servers: vec![
            format!("{}/hook", failing.uri()),
            "http://127.0.0.1:1/hook".to_string(),
            format!("{}/hook", healthy.uri()),
        ],
        ..Default::default()
    };

    let report = notify(&config, log.path()).await;
    assert_eq!(
        report,
        NotifyReport {
            delivered: 1,
            failed: 2
        }
    );
}

#[tokio::test]
async fn test_missing_log_still_sends_header() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = NotifyConfig {
        servers: vec![mock_server.uri()],
        ..Default::default()
    };

    let report = notify(&config, std::path::Path::new("/nonexistent/serialize.log")).await;
    assert_eq!(report.delivered, 1);

    let requests = mock_server.received_requests().await.unwrap();
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(payload["body"], "--------运行日志--------");
}
