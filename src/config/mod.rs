//! Configuration module for Hop-Crawler
//!
//! This module merges command-line values with an optional TOML file and
//! validates the result before any crawling starts.
//!
//! # Example
//!
//! ```no_run
//! use hop_crawler::config::{build_config, CrawlerOverrides};
//! use std::path::Path;
//!
//! let config = build_config(
//!     "http://example.com",
//!     3,
//!     Some(Path::new("hop-crawler.toml")),
//!     &CrawlerOverrides::default(),
//! )
//! .unwrap();
//! println!("Crawler will retry each URL {} times", config.crawler.retries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, DEFAULT_BACKOFF_UNIT_MS, DEFAULT_RETRIES};

// Re-export parser functions
pub use parser::{build_config, load_config, CrawlerOverrides};
pub use validation::validate;
