//! Post store abstraction.
//!
//! The classifier only needs one read query from the host's post table:
//! the distinct authors of eligible posts on one side of a cut-off instant.
//! [`MemoryPostStore`] implements it over an in-memory snapshot.

pub mod memory;

pub use memory::{AuthorRecord, MemoryPostStore, Snapshot};

use crate::core::activity::{AuthorId, PostRecord};
use crate::error::ListingResult;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Which side of the cut-off a query selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `published_at >= cut_off`
    OnOrAfter,
    /// `published_at < cut_off`
    Before,
}

impl Direction {
    pub fn contains(&self, published_at: DateTime<Utc>, cut_off: DateTime<Utc>) -> bool {
        match self {
            Direction::OnOrAfter => published_at >= cut_off,
            Direction::Before => published_at < cut_off,
        }
    }
}

/// Parameters of a distinct-author query
#[derive(Debug, Clone, Copy)]
pub struct AuthorQuery<'a> {
    pub cut_off: DateTime<Utc>,
    pub include_protected_posts: bool,
    pub direction: Direction,
    /// Authors to leave out of the result
    pub excluded: Option<&'a HashSet<AuthorId>>,
}

impl<'a> AuthorQuery<'a> {
    /// Authors with an eligible post at or after the cut-off
    pub fn on_or_after(cut_off: DateTime<Utc>, include_protected_posts: bool) -> Self {
        Self {
            cut_off,
            include_protected_posts,
            direction: Direction::OnOrAfter,
            excluded: None,
        }
    }

    /// Authors with an eligible post strictly before the cut-off
    pub fn before(cut_off: DateTime<Utc>, include_protected_posts: bool) -> Self {
        Self {
            cut_off,
            include_protected_posts,
            direction: Direction::Before,
            excluded: None,
        }
    }

    /// Builder method to exclude a set of authors
    pub fn excluding(mut self, excluded: &'a HashSet<AuthorId>) -> Self {
        self.excluded = Some(excluded);
        self
    }

    /// Whether a post satisfies every clause of the query
    pub fn matches(&self, post: &PostRecord) -> bool {
        post.is_eligible(self.include_protected_posts)
            && self.direction.contains(post.published_at, self.cut_off)
            && !self.excluded.is_some_and(|set| set.contains(&post.author))
    }
}

/// Read-only access to the host's posts.
pub trait PostStore {
    /// Distinct authors matching the query, ordered by their most recent
    /// matching post, newest first.
    fn author_ids(&self, query: &AuthorQuery<'_>) -> ListingResult<Vec<AuthorId>>;

    /// An author's eligible posts, newest first
    fn posts_by_author(
        &self,
        author: AuthorId,
        include_protected_posts: bool,
    ) -> ListingResult<Vec<PostRecord>>;
}

impl<S: PostStore + ?Sized> PostStore for &S {
    fn author_ids(&self, query: &AuthorQuery<'_>) -> ListingResult<Vec<AuthorId>> {
        (**self).author_ids(query)
    }

    fn posts_by_author(
        &self,
        author: AuthorId,
        include_protected_posts: bool,
    ) -> ListingResult<Vec<PostRecord>> {
        (**self).posts_by_author(author, include_protected_posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cut_off() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_direction_boundary() {
        let t = cut_off();
        assert!(Direction::OnOrAfter.contains(t, t));
        assert!(!Direction::Before.contains(t, t));

        let earlier = t - chrono::Duration::seconds(1);
        assert!(Direction::Before.contains(earlier, t));
        assert!(!Direction::OnOrAfter.contains(earlier, t));
    }

    #[test]
    fn test_query_matches() {
        let post = PostRecord::published(1, AuthorId(5), cut_off());

        let query = AuthorQuery::on_or_after(cut_off(), false);
        assert!(query.matches(&post));

        let excluded = HashSet::from([AuthorId(5)]);
        assert!(!query.excluding(&excluded).matches(&post));

        let protected = post.clone().with_password("pw");
        assert!(!query.matches(&protected));
        let relaxed = AuthorQuery::on_or_after(cut_off(), true);
        assert!(relaxed.matches(&protected));

        assert!(!AuthorQuery::before(cut_off(), false).matches(&post));
    }
}
