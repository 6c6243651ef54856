use crate::crawler::FrontierPolicy;
use crate::state::RetryScope;
use serde::Deserialize;
use std::time::Duration;

/// Default number of fetch attempts allowed for one URL
pub const DEFAULT_RETRIES: u32 = 3;

/// Default length of one backoff step (milliseconds)
pub const DEFAULT_BACKOFF_UNIT_MS: u64 = 1000;

/// Main configuration structure for Hop-Crawler
///
/// `start_url` and `hops` always come from the command line; the remaining
/// sections may come from an optional TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Start URL, already given its trailing slash
    #[serde(skip)]
    pub start_url: String,

    /// Hop budget
    #[serde(skip)]
    pub hops: u32,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Crawl policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum fetch attempts for one URL before it is abandoned
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Length of one backoff step (milliseconds)
    #[serde(rename = "backoff-unit-ms", default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,

    /// Order in which pending URLs are visited
    #[serde(default)]
    pub frontier: FrontierPolicy,

    /// Whether the retry counter is shared across URLs or kept per URL
    #[serde(rename = "retry-scope", default)]
    pub retry_scope: RetryScope,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl CrawlerConfig {
    /// The wait inserted before an attempt made with the given delay index
    pub fn backoff(&self, delay: u32) -> Duration {
        Duration::from_millis(self.backoff_unit_ms.saturating_mul(u64::from(delay)))
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            backoff_unit_ms: DEFAULT_BACKOFF_UNIT_MS,
            frontier: FrontierPolicy::default(),
            retry_scope: RetryScope::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Config {
    /// Creates a configuration with default policy for the given target
    pub fn new(start_url: impl Into<String>, hops: u32) -> Self {
        Self {
            start_url: start_url.into(),
            hops,
            crawler: CrawlerConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_backoff_unit_ms() -> u64 {
    DEFAULT_BACKOFF_UNIT_MS
}

fn default_user_agent() -> String {
    format!("hop-crawler/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
