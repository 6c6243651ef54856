//! URL handling module for Hop-Crawler
//!
//! The crawler deliberately treats URLs as plain strings: the only
//! normalization applied is the trailing slash used for visited-set keys, and
//! the URL that gets fetched is always the one that was discovered.

mod normalize;

pub use normalize::{is_absolute_http, normalize_visit_key, prepare_seed};
