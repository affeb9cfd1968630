//! Author resolution
//!
//! Turns classified author ids into displayable profiles. Each profile
//! carries the listing's protected-post flag so the author's own post
//! listing can honour it.

use super::types::{AuthorId, AuthorProfile, PostRecord};
use crate::error::ListingResult;
use crate::store::PostStore;

/// Maps an author id to a displayable profile
pub trait AuthorResolver {
    fn resolve(&self, id: AuthorId, include_protected_posts: bool) -> ListingResult<AuthorProfile>;
}

impl<R: AuthorResolver + ?Sized> AuthorResolver for &R {
    fn resolve(&self, id: AuthorId, include_protected_posts: bool) -> ListingResult<AuthorProfile> {
        (**self).resolve(id, include_protected_posts)
    }
}

/// Resolve ids in input order. The first failure aborts the whole list.
pub fn resolve_authors<R: AuthorResolver + ?Sized>(
    resolver: &R,
    ids: &[AuthorId],
    include_protected_posts: bool,
) -> ListingResult<Vec<AuthorProfile>> {
    ids.iter()
        .map(|id| resolver.resolve(*id, include_protected_posts))
        .collect()
}

impl AuthorProfile {
    /// This author's eligible posts, newest first
    pub fn posts<S: PostStore + ?Sized>(&self, store: &S) -> ListingResult<Vec<PostRecord>> {
        store.posts_by_author(self.id, self.include_protected_posts)
    }

    /// Most recent eligible post, if any
    pub fn latest_post<S: PostStore + ?Sized>(
        &self,
        store: &S,
    ) -> ListingResult<Option<PostRecord>> {
        Ok(self.posts(store)?.into_iter().next())
    }
}
