//! Crawler module for web page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - The frontier that orders pending URLs
//! - HTTP fetching and response classification
//! - Line-oriented anchor link extraction
//! - The crawl loop with its dedup, hop and retry policy

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, CrawlReport, Crawler};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, HttpFetcher, PageFetcher};
pub use frontier::{
    build_frontier, BreadthFirstFrontier, DepthFirstFrontier, Frontier, FrontierPolicy,
};
pub use parser::{extract_links, extract_page_links};

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier with the start URL
/// 3. Fetch pages and follow their links until the hop budget or frontier runs out
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(CrawlError)` - Crawl could not start
pub async fn crawl(config: Config) -> Result<CrawlReport, CrawlError> {
    run_crawl(config).await
}
