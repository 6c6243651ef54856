//! Statistics gathered over one crawl run

use crate::output::CrawlEvent;
use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Pages fetched successfully (equals the hop counter at the end)
    pub pages_visited: u64,

    /// Total links queued from visited pages
    pub links_found: u64,

    /// Fetch attempts made, retries included
    pub attempts: u64,

    /// Redirects whose target was queued
    pub redirects: u64,

    /// Redirects dropped for lack of an absolute `Location`
    pub redirects_dropped: u64,

    /// 5xx responses
    pub server_errors: u64,

    /// Other non-success responses
    pub http_errors: u64,

    /// Connection, timeout, and read failures
    pub transport_errors: u64,

    /// Iterations skipped by the retry cap
    pub retry_caps: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlStatistics {
    /// Creates empty statistics for a run starting now
    pub fn start() -> Self {
        Self {
            pages_visited: 0,
            links_found: 0,
            attempts: 0,
            redirects: 0,
            redirects_dropped: 0,
            server_errors: 0,
            http_errors: 0,
            transport_errors: 0,
            retry_caps: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Folds one event into the counters
    pub fn record(&mut self, event: &CrawlEvent) {
        match event {
            CrawlEvent::Fetching { .. } => self.attempts += 1,
            CrawlEvent::Visited { links_found, .. } => {
                self.pages_visited += 1;
                self.links_found += *links_found as u64;
            }
            CrawlEvent::Redirecting { .. } => self.redirects += 1,
            CrawlEvent::RedirectDropped { .. } => self.redirects_dropped += 1,
            CrawlEvent::ServerError { .. } => self.server_errors += 1,
            CrawlEvent::HttpError { .. } => self.http_errors += 1,
            CrawlEvent::TransportError { .. } => self.transport_errors += 1,
            CrawlEvent::RetryCapReached { .. } => self.retry_caps += 1,
        }
    }

    /// Marks the run as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Run duration in milliseconds, if finished
    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds())
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages visited: {}", stats.pages_visited);
    println!("  Links found: {}", stats.links_found);
    println!("  Fetch attempts: {}", stats.attempts);
    println!();

    println!("Redirects:");
    println!("  Followed: {}", stats.redirects);
    println!("  Dropped: {}", stats.redirects_dropped);
    println!();

    println!("Errors:");
    println!("  Server errors (5xx): {}", stats.server_errors);
    println!("  Other HTTP errors: {}", stats.http_errors);
    println!("  Transport errors: {}", stats.transport_errors);
    println!("  Retry cap skips: {}", stats.retry_caps);
    println!();

    println!("Started: {}", stats.started_at.to_rfc3339());
    if let (Some(finished), Some(ms)) = (stats.finished_at, stats.duration_ms()) {
        println!("Finished: {} ({}ms)", finished.to_rfc3339(), ms);
    }
}
