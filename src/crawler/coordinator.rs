//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop and the per-URL visit policy:
//! - Taking the next URL from the frontier
//! - Deduplicating against the visited set
//! - Applying the retry cap and linear backoff
//! - Classifying each fetch and feeding discovered links back into the frontier
//!
//! The loop is a single task. Each fetch, and each backoff wait before it, is
//! awaited in turn, so nothing else happens while a page is being retried.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{FetchOutcome, HttpFetcher, PageFetcher};
use crate::crawler::frontier::{build_frontier, Frontier};
use crate::crawler::parser::extract_page_links;
use crate::output::{CrawlEvent, CrawlStatistics};
use crate::state::{RetryDecision, RetryTracker, VisitOutcome};
use crate::url::{is_absolute_http, normalize_visit_key};
use crate::CrawlError;
use std::collections::HashSet;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Final value of the hop counter
    pub hops: u32,

    /// Visited-set keys
    pub visited: HashSet<String>,

    /// Every event, in the order it happened
    pub events: Vec<CrawlEvent>,

    /// URLs still in the frontier when the crawl stopped
    pub pending: usize,

    pub statistics: CrawlStatistics,
}

impl CrawlReport {
    /// Fetch attempts in order, with the backoff delay used for each
    pub fn attempts(&self) -> Vec<(&str, u32)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CrawlEvent::Fetching { url, delay, .. } => Some((url.as_str(), *delay)),
                _ => None,
            })
            .collect()
    }

    /// URLs fetched successfully, in order
    pub fn visited_pages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CrawlEvent::Visited { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns true if the URL's visited-set key was recorded
    pub fn was_visited(&self, url: &str) -> bool {
        self.visited.contains(&normalize_visit_key(url))
    }
}

/// Main crawler structure
///
/// Owns the frontier, the visited set, the hop counter and the retry state;
/// none of them are shared.
pub struct Crawler<F: PageFetcher> {
    config: CrawlerConfig,
    hop_budget: u32,
    fetcher: F,
    frontier: Box<dyn Frontier + Send>,
    visited: HashSet<String>,
    retry: RetryTracker,
    curr_hops: u32,
    events: Vec<CrawlEvent>,
    statistics: CrawlStatistics,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::new(config, fetcher))
    }
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler whose frontier holds only the start URL
    ///
    /// `config.start_url` is used as given; [`crate::config::build_config`]
    /// has already appended its trailing slash.
    pub fn new(config: &Config, fetcher: F) -> Self {
        Self {
            config: config.crawler.clone(),
            hop_budget: config.hops,
            fetcher,
            frontier: build_frontier(config.crawler.frontier, config.start_url.clone()),
            visited: HashSet::new(),
            retry: RetryTracker::new(config.crawler.retry_scope, config.crawler.retries),
            curr_hops: 0,
            events: Vec::new(),
            statistics: CrawlStatistics::start(),
        }
    }

    /// Runs the crawl loop to completion
    ///
    /// The loop stops once the hop counter exceeds the budget or the frontier
    /// is exhausted. Neither is an error.
    pub async fn run(mut self) -> CrawlReport {
        tracing::info!(
            "Starting crawl: hop budget {}, {} frontier, {} retry scope, {} attempts per URL",
            self.hop_budget,
            self.config.frontier,
            self.retry.scope(),
            self.retry.retries()
        );

        while self.curr_hops <= self.hop_budget {
            let Some(url) = self.frontier.take_next() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            let key = normalize_visit_key(&url);

            match self.retry.decide(&url, &key, &self.visited) {
                RetryDecision::CapReached => {
                    self.record(CrawlEvent::RetryCapReached {
                        hop: self.curr_hops,
                        url,
                    });
                }
                RetryDecision::AlreadyVisited => {
                    tracing::trace!("Skipping already visited {}", url);
                }
                RetryDecision::Attempt { delay } => {
                    let outcome = self.visit_url(&url, delay).await;
                    tracing::debug!("{} -> {}", url, outcome);

                    if outcome.is_success() {
                        self.curr_hops += 1;
                    }
                    self.retry.record_attempt(&url, &key);
                }
            }
        }

        if self.curr_hops > self.hop_budget {
            tracing::info!("Hop budget of {} spent", self.hop_budget);
        }

        self.statistics.finish();

        CrawlReport {
            hops: self.curr_hops,
            visited: self.visited,
            events: self.events,
            pending: self.frontier.len(),
            statistics: self.statistics,
        }
    }

    /// Fetches one URL and applies the visit policy to the response
    ///
    /// # Policy
    ///
    /// | Response | Frontier | Visited set | Outcome |
    /// |----------|----------|-------------|---------|
    /// | 200 | links appended to the current queue | marked | `Visited` |
    /// | 301/302, absolute `Location` | target pushed to the front | original marked | `Redirected` |
    /// | 301/302, missing or relative `Location` | unchanged | marked | `Failed` |
    /// | 5xx, attempts left | same URL pushed to the front | not marked | `RetryPending` |
    /// | 5xx, last attempt | same URL pushed to the front | marked | `Failed` |
    /// | other status / transport fault | unchanged | marked | `Failed` |
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch, unmodified
    /// * `delay` - Backoff steps to wait before fetching
    async fn visit_url(&mut self, url: &str, delay: u32) -> VisitOutcome {
        let hop = self.curr_hops;

        self.record(CrawlEvent::Fetching {
            hop,
            url: url.to_string(),
            delay,
        });

        let backoff = self.config.backoff(delay);
        if !backoff.is_zero() {
            tokio::time::sleep(backoff).await;
        }

        let outcome = match self.fetcher.fetch(url).await {
            FetchOutcome::Success { lines } => {
                let links = extract_page_links(&lines);
                let links_found = links.len();
                self.frontier.push_links(links);

                self.record(CrawlEvent::Visited {
                    hop,
                    url: url.to_string(),
                    links_found,
                });
                VisitOutcome::Visited { links_found }
            }

            FetchOutcome::Redirect { location, .. } => match location {
                Some(target) if is_absolute_http(&target) => {
                    self.record(CrawlEvent::Redirecting {
                        hop,
                        from: url.to_string(),
                        to: target.clone(),
                    });
                    self.frontier.push_priority(target.clone());
                    VisitOutcome::Redirected { target }
                }
                location => {
                    self.record(CrawlEvent::RedirectDropped {
                        hop,
                        url: url.to_string(),
                        location,
                    });
                    VisitOutcome::Failed
                }
            },

            FetchOutcome::ServerError { status_code } => {
                self.record(CrawlEvent::ServerError {
                    hop,
                    url: url.to_string(),
                    status_code,
                    retry: delay + 1,
                });
                self.frontier.push_priority(url.to_string());

                if delay + 1 < self.config.retries {
                    VisitOutcome::RetryPending { status_code }
                } else {
                    VisitOutcome::Failed
                }
            }

            FetchOutcome::OtherStatus { status_code } => {
                self.record(CrawlEvent::HttpError {
                    hop,
                    url: url.to_string(),
                    status_code,
                });
                VisitOutcome::Failed
            }

            FetchOutcome::Transport { error } => {
                self.record(CrawlEvent::TransportError {
                    hop,
                    url: url.to_string(),
                    error,
                });
                VisitOutcome::Failed
            }
        };

        if outcome.marks_visited() {
            self.visited.insert(normalize_visit_key(url));
        }
        outcome
    }

    fn record(&mut self, event: CrawlEvent) {
        event.emit();
        self.statistics.record(&event);
        self.events.push(event);
    }
}

/// Runs a complete crawl over HTTP
///
/// # Arguments
///
/// * `config` - A validated configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran to completion
/// * `Err(CrawlError)` - The crawl could not start
///
/// # Example
///
/// ```no_run
/// use hop_crawler::config::{build_config, CrawlerOverrides};
/// use hop_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = build_config("http://example.com", 2, None, &CrawlerOverrides::default())?;
/// let report = run_crawl(config).await?;
/// println!("{} hops", report.hops);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, CrawlError> {
    let crawler = Crawler::from_config(&config)?;
    Ok(crawler.run().await)
}
