//! Crawl frontier: the ordering of URLs still to be visited
//!
//! Two policies are provided:
//! - `DepthFirst`: a stack of per-page queues. Taking a URL pushes a fresh
//!   queue that will receive that page's links, so the most recently
//!   discovered page is explored before its siblings.
//! - `BreadthFirst`: a heap ordered by hop distance from the seed, ties
//!   broken by discovery order.
//!
//! Both give redirect targets and retries absolute priority: a URL pushed with
//! `push_priority` is the next one taken.

use serde::Deserialize;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::str::FromStr;

/// Traversal data structure holding pending URLs in visitation order
pub trait Frontier {
    /// Returns true when no URL is pending
    fn is_empty(&mut self) -> bool;

    /// Removes and returns the next URL to visit
    ///
    /// Returns `None` when the frontier is exhausted.
    fn take_next(&mut self) -> Option<String>;

    /// Queues links discovered on the page most recently taken, in discovery order
    fn push_links(&mut self, urls: Vec<String>);

    /// Queues a URL so that it is the very next one taken
    fn push_priority(&mut self, url: String);

    /// Number of URLs pending
    fn len(&self) -> usize;
}

/// Frontier selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontierPolicy {
    /// Stack of per-page queues
    #[default]
    DepthFirst,

    /// Ascending hop distance, ties in discovery order
    BreadthFirst,
}

impl fmt::Display for FrontierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthFirst => write!(f, "depth-first"),
            Self::BreadthFirst => write!(f, "breadth-first"),
        }
    }
}

impl FromStr for FrontierPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "depth-first" => Ok(Self::DepthFirst),
            "breadth-first" => Ok(Self::BreadthFirst),
            other => Err(format!(
                "unknown frontier policy '{}', expected 'depth-first' or 'breadth-first'",
                other
            )),
        }
    }
}

/// Builds a frontier for the given policy holding only the seed
pub fn build_frontier(policy: FrontierPolicy, seed: String) -> Box<dyn Frontier + Send> {
    match policy {
        FrontierPolicy::DepthFirst => Box::new(DepthFirstFrontier::new(seed)),
        FrontierPolicy::BreadthFirst => Box::new(BreadthFirstFrontier::new(seed)),
    }
}

/// Depth-first frontier: a stack of FIFO queues
///
/// The top of the stack is the last element of `levels`. Each queue holds the
/// links of one page in the order they appeared.
#[derive(Debug, Clone, Default)]
pub struct DepthFirstFrontier {
    levels: Vec<VecDeque<String>>,
}

impl DepthFirstFrontier {
    /// Creates a frontier whose single queue holds the seed
    pub fn new(seed: String) -> Self {
        Self {
            levels: vec![VecDeque::from([seed])],
        }
    }

    /// Current stack depth, including empty queues not yet popped
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    fn pop_exhausted(&mut self) {
        while matches!(self.levels.last(), Some(queue) if queue.is_empty()) {
            self.levels.pop();
        }
    }

    fn top(&mut self) -> &mut VecDeque<String> {
        // push_* with an empty stack starts a new bottom level.
        if self.levels.is_empty() {
            self.levels.push(VecDeque::new());
        }
        let top = self.levels.len() - 1;
        &mut self.levels[top]
    }
}

impl Frontier for DepthFirstFrontier {
    fn is_empty(&mut self) -> bool {
        self.pop_exhausted();
        self.levels.is_empty()
    }

    fn take_next(&mut self) -> Option<String> {
        self.pop_exhausted();
        let url = self.levels.last_mut()?.pop_front()?;
        self.levels.push(VecDeque::new());
        Some(url)
    }

    fn push_links(&mut self, urls: Vec<String>) {
        self.top().extend(urls);
    }

    fn push_priority(&mut self, url: String) {
        self.top().push_front(url);
    }

    fn len(&self) -> usize {
        self.levels.iter().map(VecDeque::len).sum()
    }
}

/// A URL waiting in the breadth-first heap
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    distance: u32,
    sequence: i64,
    url: String,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.distance, self.sequence).cmp(&(other.distance, other.sequence))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Breadth-first frontier: ascending hop distance from the seed
///
/// Discovery order breaks ties. Priority pushes take the distance of the page
/// most recently taken and a negative sequence number, which sorts them ahead
/// of every other pending URL.
#[derive(Debug, Clone, Default)]
pub struct BreadthFirstFrontier {
    heap: BinaryHeap<Reverse<Pending>>,
    current_distance: u32,
    next_sequence: i64,
    next_priority: i64,
}

impl BreadthFirstFrontier {
    /// Creates a frontier holding the seed at distance zero
    pub fn new(seed: String) -> Self {
        let mut frontier = Self::default();
        frontier.push_at(0, seed);
        frontier
    }

    fn push_at(&mut self, distance: u32, url: String) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(Pending {
            distance,
            sequence,
            url,
        }));
    }
}

impl Frontier for BreadthFirstFrontier {
    fn is_empty(&mut self) -> bool {
        self.heap.is_empty()
    }

    fn take_next(&mut self) -> Option<String> {
        let Reverse(pending) = self.heap.pop()?;
        self.current_distance = pending.distance;
        Some(pending.url)
    }

    fn push_links(&mut self, urls: Vec<String>) {
        let distance = self.current_distance.saturating_add(1);
        for url in urls {
            self.push_at(distance, url);
        }
    }

    fn push_priority(&mut self, url: String) {
        self.next_priority -= 1;
        self.heap.push(Reverse(Pending {
            distance: self.current_distance,
            sequence: self.next_priority,
            url,
        }));
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
