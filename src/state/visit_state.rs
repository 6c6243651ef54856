/// Outcome definitions for a single visit attempt
///
/// Every call into the fetch-and-classify step ends in exactly one of these.
use std::fmt;

/// Represents what one fetch attempt did to a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    // ===== Success =====
    /// Page returned 200 and its links were queued
    Visited {
        /// Number of links pushed onto the frontier
        links_found: usize,
    },

    // ===== Pending =====
    /// Page redirected to an absolute URL that now sits at the front of the frontier
    Redirected {
        /// The redirect target
        target: String,
    },

    /// Page returned 5xx and still has attempts left; it is not marked visited
    RetryPending {
        /// The HTTP status code
        status_code: u16,
    },

    // ===== Terminal Error =====
    /// Attempt failed for good (other status, dropped redirect, last 5xx, transport fault)
    Failed,
}

impl VisitOutcome {
    /// Returns true if this attempt counts as a hop
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Visited { .. })
    }

    /// Returns true if the attempted URL was added to the visited set
    ///
    /// Only a pending retry leaves the URL eligible for another fetch. A
    /// redirect marks the original URL even though the target is still pending.
    pub fn marks_visited(&self) -> bool {
        !matches!(self, Self::RetryPending { .. })
    }
}

impl fmt::Display for VisitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visited { links_found } => write!(f, "visited ({} links)", links_found),
            Self::Redirected { target } => write!(f, "redirected to {}", target),
            Self::RetryPending { status_code } => write!(f, "retry pending (HTTP {})", status_code),
            Self::Failed => write!(f, "failed"),
        }
    }
}
