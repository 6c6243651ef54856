use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// How retry counts are scoped across URLs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetryScope {
    /// One `(previous URL, delay)` pair for the whole crawl
    ///
    /// The delay only escalates across consecutive iterations that address
    /// the same URL. When it reaches the cap, whatever URL comes off the
    /// frontier next is skipped without being fetched or marked visited.
    #[default]
    Shared,

    /// One attempt counter per normalized URL
    ///
    /// The counter only sets the backoff delay. A URL's last allowed attempt
    /// always ends in an outcome that marks it visited, which retires it.
    PerUrl,
}

impl fmt::Display for RetryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::PerUrl => write!(f, "per-url"),
        }
    }
}

impl FromStr for RetryScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared" => Ok(Self::Shared),
            "per-url" => Ok(Self::PerUrl),
            other => Err(format!(
                "unknown retry scope '{}', expected 'shared' or 'per-url'",
                other
            )),
        }
    }
}

/// What the crawl loop should do with the URL it just took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Fetch it after waiting `delay` backoff steps
    Attempt { delay: u32 },

    /// The shared retry cap fired; skip this iteration without marking anything
    CapReached,

    /// The URL is already in the visited set
    AlreadyVisited,
}

/// Retry bookkeeping carried between iterations of the crawl loop
#[derive(Debug, Clone)]
pub struct RetryTracker {
    scope: RetryScope,
    retries: u32,

    /// URL of the previous attempt (shared scope)
    prev_url: String,

    /// Current delay index (shared scope)
    delay: u32,

    /// Attempts made so far, keyed by visited-set key (per-url scope)
    attempts: HashMap<String, u32>,
}

impl RetryTracker {
    /// Creates a tracker allowing `retries` attempts per URL
    pub fn new(scope: RetryScope, retries: u32) -> Self {
        Self {
            scope,
            retries,
            prev_url: String::new(),
            delay: 0,
            attempts: HashMap::new(),
        }
    }

    /// Decides what to do with a URL taken from the frontier
    ///
    /// # Arguments
    ///
    /// * `url` - The URL as it will be fetched
    /// * `key` - Its visited-set key
    /// * `visited` - The visited set
    pub fn decide(&mut self, url: &str, key: &str, visited: &HashSet<String>) -> RetryDecision {
        match self.scope {
            RetryScope::Shared => {
                // The cap check runs before the visited check and ignores which URL this is.
                if self.delay >= self.retries {
                    self.prev_url.clear();
                    self.delay = 0;
                    return RetryDecision::CapReached;
                }

                if visited.contains(key) {
                    return RetryDecision::AlreadyVisited;
                }

                if self.prev_url != url {
                    self.delay = 0;
                }

                RetryDecision::Attempt { delay: self.delay }
            }
            RetryScope::PerUrl => {
                if visited.contains(key) {
                    return RetryDecision::AlreadyVisited;
                }

                let used = self.attempts.get(key).copied().unwrap_or(0);
                RetryDecision::Attempt { delay: used }
            }
        }
    }

    /// Records that an attempt was made, whatever its outcome
    pub fn record_attempt(&mut self, url: &str, key: &str) {
        match self.scope {
            RetryScope::Shared => {
                self.delay += 1;
                if self.prev_url != url {
                    self.prev_url = url.to_string();
                }
            }
            RetryScope::PerUrl => {
                *self.attempts.entry(key.to_string()).or_insert(0) += 1;
            }
        }
    }

    pub fn scope(&self) -> RetryScope {
        self.scope
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }
}
