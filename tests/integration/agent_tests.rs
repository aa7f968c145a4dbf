//! Integration tests for the star agent
//!
//! These tests use wiremock to stand in for the catalog service and run the
//! full discovery/star cycle over HTTP.

use gitstar_reflector::agent::{execute, Coordinator, OutcomeKind, TaskOutcome};
use gitstar_reflector::config::Config;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, work_pages: u32) -> Config {
    let mut config = Config::default();
    config.account.token = TOKEN.to_string();
    config.account.user_agent = "TestAgent/1.0".to_string();
    config.endpoints.base_url = base_url.to_string();
    config.agent.work_pages = work_pages;
    config.agent.request_timeout_secs = 5;
    config
}

fn listing(names: &[&str]) -> Value {
    let datas: Vec<Value> = names.iter().map(|n| json!({ "full_name": n })).collect();
    json!({ "result": { "datas": datas } })
}

async fn mount_page(server: &MockServer, page: u32, names: &[&str], delay: Option<Duration>) {
    let mut response = ResponseTemplate::new(200).set_body_json(listing(names));
    if let Some(delay) = delay {
        response = response.set_delay(delay);
    }

    Mock::given(method("POST"))
        .and(path("/api/repos"))
        .and(body_json(json!({ "page": page, "type": 1 })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_star(server: &MockServer, full_name: &str, body: Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/upload_star"))
        .and(body_json(json!({ "full_name": full_name, "type": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn star_ok() -> Value {
    json!({ "result": true, "code": "200", "msg": "ok" })
}

#[tokio::test]
async fn test_single_page_all_stars_succeed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/repos"))
        .and(header("authorization", "token test-token"))
        .and(body_json(json!({ "page": 1, "type": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[
            "octo/one",
            "octo/two",
            "octo/three",
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    for name in ["octo/one", "octo/two", "octo/three"] {
        mount_star(&mock_server, name, star_ok(), 1).await;
    }

    let config = create_test_config(&mock_server.uri(), 1);
    let report = Coordinator::from_config(&config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert_eq!(report.workers, 1);
    assert_eq!(report.remaining, 0);
    assert!(!report.latch_tripped);
    assert_eq!(report.count(OutcomeKind::Starred), 3);
    assert_eq!(report.count(OutcomeKind::StarFailed), 0);
}

#[tokio::test]
async fn test_restricted_account_aborts_pending_work() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, 1, &["octo/first", "octo/second"], None).await;
    mount_page(
        &mock_server,
        2,
        &["late/one"],
        Some(Duration::from_millis(300)),
    )
    .await;

    mount_star(
        &mock_server,
        "octo/first",
        json!({ "result": false, "code": "403_restricted", "msg": "star limit reached" }),
        1,
    )
    .await;
    mount_star(&mock_server, "octo/second", star_ok(), 0).await;
    mount_star(&mock_server, "late/one", star_ok(), 0).await;

    let config = create_test_config(&mock_server.uri(), 2);
    let report = Coordinator::from_config(&config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert!(report.latch_tripped);
    assert_eq!(report.remaining, 0);
    assert_eq!(report.count(OutcomeKind::Restricted), 1);
    assert_eq!(report.count(OutcomeKind::Starred), 0);

    let restricted = report
        .outcomes
        .iter()
        .find(|o| o.kind() == OutcomeKind::Restricted)
        .expect("restriction outcome missing");
    assert!(matches!(
        restricted,
        TaskOutcome::Restricted { code, msg, .. }
            if code.as_deref() == Some("403_restricted")
                && msg.as_deref() == Some("star limit reached")
    ));
}

#[tokio::test]
async fn test_unreachable_catalog_ends_cleanly() {
    // Nothing listens on port 1
    let config = create_test_config("http://127.0.0.1:1", 1);
    let report = Coordinator::from_config(&config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert!(!report.latch_tripped);
    assert_eq!(report.remaining, 0);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.count(OutcomeKind::DiscoveryFailed), 1);
}

#[tokio::test]
async fn test_failed_page_does_not_block_neighbours() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, 1, &["one/a"], None).await;
    Mock::given(method("POST"))
        .and(path("/api/repos"))
        .and(body_json(json!({ "page": 2, "type": 1 })))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 3, &["three/a", "three/b"], None).await;

    for name in ["one/a", "three/a", "three/b"] {
        mount_star(&mock_server, name, star_ok(), 1).await;
    }

    let config = create_test_config(&mock_server.uri(), 3);
    let report = Coordinator::from_config(&config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert_eq!(report.count(OutcomeKind::DiscoveryFailed), 1);
    assert_eq!(report.count(OutcomeKind::Discovered), 2);
    assert_eq!(report.count(OutcomeKind::Starred), 3);
    assert!(!report.latch_tripped);
}

#[tokio::test]
async fn test_unexpected_star_payload_is_transient() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, 1, &["x/1", "x/2", "x/3"], None).await;
    mount_star(
        &mock_server,
        "x/1",
        json!({ "result": false, "code": "500", "msg": "internal" }),
        1,
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/upload_star"))
        .and(body_json(json!({ "full_name": "x/2", "type": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_star(&mock_server, "x/3", star_ok(), 1).await;

    let config = create_test_config(&mock_server.uri(), 1);
    let report = Coordinator::from_config(&config)
        .expect("Failed to create coordinator")
        .run()
        .await;

    assert!(!report.latch_tripped);
    assert_eq!(report.count(OutcomeKind::StarFailed), 2);
    assert_eq!(report.count(OutcomeKind::Starred), 1);
}

#[tokio::test]
async fn test_repeated_runs_yield_same_outcomes() {
    let mock_server = MockServer::start().await;

    for page in 1..=2u32 {
        let first = format!("p{}/a", page);
        let second = format!("p{}/b", page);
        Mock::given(method("POST"))
            .and(path("/api/repos"))
            .and(body_json(json!({ "page": page, "type": 1 })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(listing(&[first.as_str(), second.as_str()])),
            )
            .expect(2)
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/api/upload_star"))
        .respond_with(ResponseTemplate::new(200).set_body_json(star_ok()))
        .expect(8)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 2);
    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");

    let first = coordinator.run().await;
    let second = coordinator.run().await;

    assert_eq!(first.outcome_set(), second.outcome_set());
    assert_eq!(second.count(OutcomeKind::Starred), 4);
}

#[tokio::test]
async fn test_execute_skips_limited_account() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check_limit"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "result": { "limit": true } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 1);
    let report = execute(&config).await.expect("execute failed");

    assert!(report.is_none());
}

#[tokio::test]
async fn test_execute_runs_when_limit_check_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check_limit"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 1, &["solo/repo"], None).await;
    mount_star(&mock_server, "solo/repo", star_ok(), 1).await;

    let config = create_test_config(&mock_server.uri(), 1);
    let report = execute(&config)
        .await
        .expect("execute failed")
        .expect("run should proceed on unknown limit status");

    assert_eq!(report.count(OutcomeKind::Starred), 1);
}

#[tokio::test]
async fn test_execute_can_skip_limit_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/check_limit"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "result": { "limit": true } })),
        )
        .expect(0)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 1, &[], None).await;

    let mut config = create_test_config(&mock_server.uri(), 1);
    config.agent.skip_limit_check = true;
    let report = execute(&config).await.expect("execute failed");

    assert!(report.is_some());
}
