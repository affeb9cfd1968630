//! Author activity classification module
//!
//! This module provides functionality for:
//! - Splitting post authors into active and inactive sets around a cut-off
//! - Memoizing id sets and resolved author lists per configuration
//! - Resolving author ids into displayable profiles

pub mod cache;
pub mod classifier;
pub mod resolver;
pub mod types;

// Re-export commonly used items
pub use cache::{CacheEntry, ListingCache};
pub use classifier::{ActivityClassifier, Clock, FixedClock, SystemClock};
pub use resolver::{resolve_authors, AuthorResolver};
pub use types::{Activity, AuthorId, AuthorProfile, PostRecord, PostStatus, PostType};
