//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitOutcome`: What a single fetch attempt did to a URL (visited, redirected, pending retry, failed)
//! - `RetryTracker`: The retry/backoff bookkeeping carried across loop iterations
//! - `RetryScope`: Whether that bookkeeping is one shared counter or one counter per URL

mod retry_state;
mod visit_state;

// Re-export main types
pub use retry_state::{RetryDecision, RetryScope, RetryTracker};
pub use visit_state::VisitOutcome;
