//! Exit-code tests for the hop-crawler binary
//!
//! Argument and configuration errors must exit with status 1 before any
//! request is made; help, version and a completed crawl exit with 0.

use std::process::{Command, Output};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hop-crawler"))
        .args(args)
        .output()
        .expect("Failed to run hop-crawler")
}

fn exit_code(args: &[&str]) -> Option<i32> {
    run(args).status.code()
}

#[test]
fn test_missing_hops_exits_with_one() {
    assert_eq!(exit_code(&["http://a.test"]), Some(1));
}

#[test]
fn test_non_integer_hops_exits_with_one() {
    assert_eq!(exit_code(&["http://a.test", "x"]), Some(1));
    assert_eq!(exit_code(&["http://a.test", "-1"]), Some(1));
}

#[test]
fn test_no_arguments_exits_with_one() {
    assert_eq!(exit_code(&[]), Some(1));
}

#[test]
fn test_invalid_seed_exits_with_one() {
    assert_eq!(exit_code(&["not a url", "1"]), Some(1));
    assert_eq!(exit_code(&["ftp://a.test/", "1"]), Some(1));
}

#[test]
fn test_zero_retries_exits_with_one() {
    assert_eq!(exit_code(&["http://a.test", "1", "--retries", "0"]), Some(1));
}

#[test]
fn test_missing_config_file_exits_with_one() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("absent.toml");

    assert_eq!(
        exit_code(&["http://a.test", "1", "-c", missing.to_str().unwrap()]),
        Some(1)
    );
}

#[test]
fn test_help_exits_with_zero() {
    let output = run(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_version_exits_with_zero() {
    let output = run(&["--version"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_completed_crawl_exits_with_zero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let status = tokio::process::Command::new(env!("CARGO_BIN_EXE_hop-crawler"))
        .args([mock_server.uri().as_str(), "0", "-q"])
        .status()
        .await
        .expect("Failed to run hop-crawler");

    assert_eq!(status.code(), Some(0));
}
