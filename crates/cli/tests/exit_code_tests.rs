//! Integration tests for structured exit codes.
//!
//! These tests verify that confstore returns the correct exit codes
//! for different failure modes, enabling reliable shell scripting.

mod common;

use common::{confstore_cmd, write_file};
use predicates::prelude::*;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(template: ResponseTemplate) -> (MockServer, String) {
    let server = MockServer::start().await;
    Mock::given(path("/app.json"))
        .respond_with(template)
        .mount(&server)
        .await;
    let url = format!("{}/app.json", server.uri());
    (server, url)
}

#[tokio::test]
async fn test_success_returns_exit_code_0() {
    let (_server, url) = serve(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#)).await;

    confstore_cmd()
        .args(["--compact", &url])
        .assert()
        .code(0)
        .stdout("{\"ok\":true}\n");
}

#[test]
fn test_missing_file_returns_exit_code_2() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");

    confstore_cmd()
        .arg(&missing)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_unsupported_scheme_returns_exit_code_2() {
    confstore_cmd()
        .arg("ftp://example.com/app.json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no valid source found"));
}

#[test]
fn test_invalid_header_reported_in_diagnostics() {
    confstore_cmd()
        .args(["-H", "bad name: v", "http://127.0.0.1:9/app.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no valid source found"))
        .stderr(predicate::str::contains("invalid header name"));
}

#[test]
fn test_connection_refused_returns_exit_code_3() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    confstore_cmd()
        .arg(format!("http://{addr}/app.json"))
        .assert()
        .code(3);
}

#[tokio::test]
async fn test_server_error_returns_exit_code_4() {
    let (_server, url) = serve(ResponseTemplate::new(500)).await;

    confstore_cmd()
        .arg(&url)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("GET"))
        .stderr(predicate::str::contains(url.as_str()))
        .stderr(predicate::str::contains("500 Internal Server Error"));
}

#[tokio::test]
async fn test_method_is_reported_in_status_error() {
    let (_server, url) = serve(ResponseTemplate::new(405)).await;

    confstore_cmd()
        .args(["-X", "POST", &url])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("POST"));
}

#[tokio::test]
async fn test_body_too_large_returns_exit_code_5() {
    let (_server, url) = serve(ResponseTemplate::new(200).set_body_bytes(vec![b' '; 2000])).await;

    confstore_cmd()
        .args(["--max-body-size", "1024", &url])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("exceeds limit 1024"));
}

#[test]
fn test_undecodable_payload_returns_exit_code_6() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "broken.yaml", "a: [1, 2\n");

    confstore_cmd()
        .arg(&path)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("fallback unmarshal failed"))
        .stderr(predicate::str::contains("decoder[0]"))
        .stderr(predicate::str::contains("decoder[1]"));
}

#[tokio::test]
async fn test_timeout_returns_exit_code_124() {
    let (_server, url) = serve(
        ResponseTemplate::new(200)
            .set_body_string("{}")
            .set_delay(Duration::from_secs(10)),
    )
    .await;

    confstore_cmd()
        .args(["--timeout", "1", &url])
        .assert()
        .code(124)
        .stderr(predicate::str::contains("deadline exceeded"));
}

#[test]
fn test_missing_location_is_usage_error() {
    confstore_cmd().assert().code(2).stderr(predicate::str::contains("Usage"));
}
