//! Crawl events: one report line per meaningful thing the crawler does

use std::fmt;

/// Something worth reporting during a crawl
///
/// `hop` is always the hop counter at the time of the event, before any
/// increment the event itself causes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A fetch attempt is about to start after `delay` backoff steps
    Fetching { hop: u32, url: String, delay: u32 },

    /// A page was fetched successfully
    Visited {
        hop: u32,
        url: String,
        links_found: usize,
    },

    /// A redirect target was queued ahead of everything else
    Redirecting { hop: u32, from: String, to: String },

    /// A redirect had no usable `Location` and was treated as a dead end
    RedirectDropped {
        hop: u32,
        url: String,
        location: Option<String>,
    },

    /// A 5xx response; `retry` is the number of the attempt that just failed
    ServerError {
        hop: u32,
        url: String,
        status_code: u16,
        retry: u32,
    },

    /// Any other non-success status
    HttpError {
        hop: u32,
        url: String,
        status_code: u16,
    },

    /// The request could not be completed
    TransportError { hop: u32, url: String, error: String },

    /// The retry cap fired and an iteration was skipped
    RetryCapReached { hop: u32, url: String },
}

impl CrawlEvent {
    /// Returns true for events describing a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::RedirectDropped { .. }
                | Self::ServerError { .. }
                | Self::HttpError { .. }
                | Self::TransportError { .. }
        )
    }

    /// Writes the event to the log at a level matching its severity
    pub fn emit(&self) {
        match self {
            Self::Fetching { .. } => tracing::debug!("{}", self),
            Self::RetryCapReached { .. } => tracing::info!("{}", self),
            event if event.is_error() => tracing::warn!("{}", event),
            event => tracing::info!("{}", event),
        }
    }
}

impl fmt::Display for CrawlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetching { hop, url, delay } => {
                write!(f, "HOP {}\tFetching {}\tDelay: {}", hop, url, delay)
            }
            Self::Visited {
                hop,
                url,
                links_found,
            } => write!(f, "HOP {}\tVisited {}\tFound {} URLs", hop, url, links_found),
            Self::Redirecting { hop, from, to } => {
                write!(f, "HOP {}\tRedirecting from {} to {}", hop, from, to)
            }
            Self::RedirectDropped { hop, url, location } => write!(
                f,
                "HOP {}\tRedirecting from {} to {}\tIgnored: not an absolute URL",
                hop,
                url,
                location.as_deref().unwrap_or("<missing>")
            ),
            Self::ServerError {
                hop,
                url,
                status_code,
                retry,
            } => write!(
                f,
                "HOP {}\tError from {}\tResponse Code: {}\tRetry: {}",
                hop, url, status_code, retry
            ),
            Self::HttpError {
                hop,
                url,
                status_code,
            } => write!(f, "HOP {}\tError from {}\tResponse Code: {}", hop, url, status_code),
            Self::TransportError { hop, url, error } => {
                write!(f, "HOP {}\tError while visiting {}\t{}", hop, url, error)
            }
            Self::RetryCapReached { hop, url } => {
                write!(f, "HOP {}\tRetry cap reached, skipping {}", hop, url)
            }
        }
    }
}
