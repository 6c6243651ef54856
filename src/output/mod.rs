//! Output module for crawl reporting
//!
//! This module handles:
//! - The per-event report lines (`HOP n  Visited ...`)
//! - End-of-run statistics

mod events;
pub mod stats;

pub use events::CrawlEvent;
pub use stats::{print_statistics, CrawlStatistics};
