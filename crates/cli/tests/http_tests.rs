//! Integration tests for remote locations.

mod common;

use common::confstore_cmd;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_headers_and_method_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app.yaml"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("x-env", "prod"))
        .respond_with(ResponseTemplate::new(200).set_body_string("replicas: 3\n"))
        .expect(1)
        .mount(&server)
        .await;

    confstore_cmd()
        .args([
            "-X",
            "POST",
            "-H",
            "Authorization: Bearer test-token",
            "--header",
            "X-Env: prod",
            "--compact",
            &format!("{}/app.yaml", server.uri()),
        ])
        .assert()
        .success()
        .stdout("{\"replicas\":3}\n");
}

#[tokio::test]
async fn test_method_from_env() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/app.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1,2]"))
        .expect(1)
        .mount(&server)
        .await;

    confstore_cmd()
        .env("CONFSTORE_METHOD", "PUT")
        .args(["--compact", &format!("{}/app.json", server.uri())])
        .assert()
        .success()
        .stdout("[1,2]\n");
}

#[tokio::test]
async fn test_remote_payload_expanded() {
    let server = MockServer::start().await;
    Mock::given(path("/app.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"region":"$REGION"}"#))
        .mount(&server)
        .await;

    confstore_cmd()
        .env("REGION", "eu-west-1")
        .args([
            "--compact",
            "--expand-env",
            &format!("{}/app.json", server.uri()),
        ])
        .assert()
        .success()
        .stdout("{\"region\":\"eu-west-1\"}\n");
}

#[tokio::test]
async fn test_body_at_limit_accepted() {
    let server = MockServer::start().await;
    let body = format!("\"{}\"", "a".repeat(1022));
    Mock::given(path("/app.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    confstore_cmd()
        .args([
            "--max-body-size",
            "1024",
            "--compact",
            &format!("{}/app.json", server.uri()),
        ])
        .assert()
        .success();
}
