//! Hop-Crawler: a bounded-depth web crawler
//!
//! Starting from a seed URL, this crate fetches pages, extracts absolute anchor
//! links line by line, and follows them until a hop budget is spent or the
//! frontier runs dry. Redirect targets and retried pages jump the queue, and
//! transient server errors are retried with a linear backoff.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Hop-Crawler operations
///
/// Only failures that prevent a crawl from starting surface here. Everything
/// that goes wrong while visiting a page is recovered inside the crawl loop.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, FrontierPolicy};
pub use state::{RetryScope, VisitOutcome};
pub use crate::url::{normalize_visit_key, prepare_seed};
