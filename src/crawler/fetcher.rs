//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client (no automatic redirects)
//! - Issuing a single GET per attempt
//! - Classifying the response into the outcomes the crawl policy cares about

use crate::config::HttpConfig;
use reqwest::{header::LOCATION, redirect::Policy, Client, StatusCode};
use std::future::Future;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// HTTP 200 with the body split into lines
    Success {
        /// Page body, one entry per line
        lines: Vec<String>,
    },

    /// HTTP 301 or 302
    Redirect {
        /// The HTTP status code
        status_code: u16,
        /// Raw `Location` header value, if present and readable
        location: Option<String>,
    },

    /// HTTP 5xx
    ServerError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Any other status code
    OtherStatus {
        /// The HTTP status code
        status_code: u16,
    },

    /// Connection, timeout, or body read failure
    Transport {
        /// Error description
        error: String,
    },
}

/// Performs one non-redirect-following GET for a URL
///
/// The crawl loop is generic over this trait so the traversal policy can be
/// driven without a network.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::none()) // Redirects are crawl policy, not transport
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and classifies the response
///
/// # Classification
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | HTTP 200 | `Success` with body lines |
/// | HTTP 301 / 302 | `Redirect` with the `Location` header |
/// | HTTP 5xx | `ServerError` |
/// | Any other status | `OtherStatus` |
/// | Connect / timeout / read failure | `Transport` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch, used unmodified
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::Transport {
                error: describe_error(&e),
            }
        }
    };

    let status = response.status();

    if status == StatusCode::OK {
        return match response.text().await {
            Ok(body) => FetchOutcome::Success {
                lines: body.lines().map(str::to_string).collect(),
            },
            Err(e) => FetchOutcome::Transport {
                error: describe_error(&e),
            },
        };
    }

    if status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        return FetchOutcome::Redirect {
            status_code: status.as_u16(),
            location,
        };
    }

    if status.is_server_error() {
        return FetchOutcome::ServerError {
            status_code: status.as_u16(),
        };
    }

    FetchOutcome::OtherStatus {
        status_code: status.as_u16(),
    }
}

/// Turns a reqwest error into a short description
fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else if e.is_builder() {
        format!("Invalid request: {}", e)
    } else {
        e.to_string()
    }
}
