//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! HTTP fetcher through the full crawl loop.

use hop_crawler::config::{build_config, Config, CrawlerOverrides};
use hop_crawler::crawler::{run_crawl, CrawlReport};
use hop_crawler::output::CrawlEvent;
use hop_crawler::{FrontierPolicy, RetryScope};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a short backoff step
fn create_test_config(seed: &str, hops: u32) -> Config {
    let overrides = CrawlerOverrides {
        backoff_unit_ms: Some(10), // Very short for testing
        ..Default::default()
    };
    build_config(seed, hops, None, &overrides).expect("Failed to build config")
}

/// Builds an HTML page with one anchor per line
fn html_page(links: &[String]) -> String {
    let mut body = String::from("<html><head><title>Test</title></head><body>\n");
    for link in links {
        body.push_str(&format!("<a href=\"{}\">link</a>\n", link));
    }
    body.push_str("</body></html>\n");
    body
}

async fn mount_page(server: &MockServer, page_path: &str, links: &[String]) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(links))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn fetch_order(report: &CrawlReport) -> Vec<String> {
    report
        .attempts()
        .into_iter()
        .map(|(url, _)| url.to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &[format!("{}/page1", base_url), format!("{}/page2", base_url)],
    )
    .await;
    mount_page(&mock_server, "/page1", &[]).await;
    mount_page(&mock_server, "/page2", &[]).await;

    let config = create_test_config(&base_url, 5);
    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.hops, 3);
    assert_eq!(
        report.visited_pages(),
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );
    assert_eq!(report.statistics.links_found, 2);
}

#[tokio::test]
async fn test_seed_gets_trailing_slash() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/docs/", &[]).await;

    let config = create_test_config(&format!("{}/docs", base_url), 0);
    assert_eq!(config.start_url, format!("{}/docs/", base_url));

    let report = run_crawl(config).await.expect("Crawl failed");
    assert_eq!(report.hops, 1);
}

#[tokio::test]
async fn test_redirect_is_followed_before_siblings() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &[format!("{}/old", base_url), format!("{}/sibling", base_url)],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", format!("{}/new", base_url).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/new", &[]).await;
    mount_page(&mock_server, "/sibling", &[]).await;

    let config = create_test_config(&base_url, 10);
    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(
        fetch_order(&report),
        vec![
            format!("{}/", base_url),
            format!("{}/old", base_url),
            format!("{}/new", base_url),
            format!("{}/sibling", base_url),
        ]
    );
    // The seed, the redirect target and the sibling count; the redirect does not.
    assert_eq!(report.hops, 3);
    assert!(report.was_visited(&format!("{}/old", base_url)));
    assert_eq!(report.statistics.redirects, 1);
}

#[tokio::test]
async fn test_relative_redirect_ends_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/relative"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 3);
    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.hops, 0);
    assert_eq!(report.pending, 0);
    assert!(report.was_visited(&format!("{}/", base_url)));
    assert_eq!(report.statistics.redirects_dropped, 1);
}

#[tokio::test]
async fn test_server_error_is_retried_with_backoff() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 3);
    let report = run_crawl(config).await.expect("Crawl failed");

    let seed = format!("{}/", base_url);
    assert_eq!(
        report.attempts(),
        vec![(seed.as_str(), 0), (seed.as_str(), 1), (seed.as_str(), 2)]
    );
    assert_eq!(report.hops, 0);
    assert!(report.was_visited(&seed));

    let retry_lines: Vec<String> = report
        .events
        .iter()
        .filter(|event| matches!(event, CrawlEvent::ServerError { .. }))
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        retry_lines.last().map(String::as_str),
        Some(format!("HOP 0\tError from {}\tResponse Code: 503\tRetry: 3", seed).as_str())
    );
}

#[tokio::test]
async fn test_server_error_recovers() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", &[]).await;

    let config = create_test_config(&base_url, 3);
    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.attempts().len(), 2);
    assert_eq!(report.hops, 1);
    assert_eq!(report.statistics.server_errors, 1);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &[format!("{}/missing", base_url), format!("{}/missing/", base_url)],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 3);
    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.hops, 1);
    assert_eq!(report.statistics.http_errors, 1);
    assert!(report.was_visited(&format!("{}/missing", base_url)));
}

#[tokio::test]
async fn test_unreachable_link_is_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["http://127.0.0.1:9/".to_string()]).await;

    let config = create_test_config(&base_url, 3);
    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.hops, 1);
    assert_eq!(report.statistics.transport_errors, 1);
    assert!(report.was_visited("http://127.0.0.1:9/"));
}

#[tokio::test]
async fn test_hop_budget_limits_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &[format!("{}/a", base_url)]).await;
    mount_page(&mock_server, "/a", &[format!("{}/b", base_url)]).await;
    mount_page(&mock_server, "/b", &[format!("{}/c", base_url)]).await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 2);
    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.hops, 3);
    assert_eq!(report.pending, 1);
}

#[tokio::test]
async fn test_breadth_first_from_config() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &[format!("{}/a", base_url), format!("{}/b", base_url)],
    )
    .await;
    mount_page(&mock_server, "/a", &[format!("{}/a/deep", base_url)]).await;
    mount_page(&mock_server, "/b", &[]).await;
    mount_page(&mock_server, "/a/deep", &[]).await;

    let overrides = CrawlerOverrides {
        backoff_unit_ms: Some(10),
        frontier: Some(FrontierPolicy::BreadthFirst),
        retry_scope: Some(RetryScope::PerUrl),
        ..Default::default()
    };
    let config = build_config(&base_url, 10, None, &overrides).expect("Failed to build config");
    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(
        report.visited_pages(),
        vec![
            format!("{}/", base_url),
            format!("{}/a", base_url),
            format!("{}/b", base_url),
            format!("{}/a/deep", base_url),
        ]
    );
}
