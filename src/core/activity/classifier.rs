//! Active/inactive author classification
//!
//! An author is active when they have an eligible post published at or
//! after the cut-off, and inactive when their eligible posts all predate
//! it. Authors without eligible posts are in neither list.
//!
//! All results are memoized per [`Configuration`] in a [`ListingCache`].
//! A classifier is single-owner: every memoizing call takes `&mut self`.
//! Share one between threads only behind your own lock, or give each
//! request its own classifier.

use super::cache::ListingCache;
use super::resolver::{resolve_authors, AuthorResolver};
use super::types::{Activity, AuthorId, AuthorProfile};
use crate::config::Configuration;
use crate::error::ListingResult;
use crate::store::{AuthorQuery, PostStore};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashSet;

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Partitions post authors into active and inactive sets
pub struct ActivityClassifier<S, C = SystemClock> {
    store: S,
    clock: C,
    cache: ListingCache,
}

impl<S: PostStore> ActivityClassifier<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: PostStore, C: Clock> ActivityClassifier<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            cache: ListingCache::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &ListingCache {
        &self.cache
    }

    /// Forget every memoized result so the next call re-queries the store
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Cut-off instant for `config`, fixed the first time it is asked for
    pub fn cut_off_time(&mut self, config: &Configuration) -> DateTime<Utc> {
        let clock = &self.clock;
        self.cache.cut_off_or_insert(config, || clock.now())
    }

    /// Distinct authors with an eligible post at or after the cut-off,
    /// most recent first
    pub fn active_author_ids(&mut self, config: &Configuration) -> ListingResult<&[AuthorId]> {
        let cut_off = self.cut_off_time(config);

        if self.cache.ids(config, Activity::Active).is_none() {
            let query = AuthorQuery::on_or_after(cut_off, config.include_protected_posts());
            let ids = self.store.author_ids(&query)?;
            debug!("computed {} active author ids", ids.len());
            self.cache.insert_ids(config, Activity::Active, ids);
        }

        Ok(self.cache.ids(config, Activity::Active).unwrap_or_default())
    }

    /// Distinct authors with an eligible post before the cut-off and none
    /// on or after it
    pub fn inactive_author_ids(&mut self, config: &Configuration) -> ListingResult<&[AuthorId]> {
        let cut_off = self.cut_off_time(config);

        if self.cache.ids(config, Activity::Inactive).is_none() {
            let active: HashSet<AuthorId> =
                self.active_author_ids(config)?.iter().copied().collect();
            let query =
                AuthorQuery::before(cut_off, config.include_protected_posts()).excluding(&active);
            let ids = self.store.author_ids(&query)?;
            debug!(
                "computed {} inactive author ids ({} active excluded)",
                ids.len(),
                active.len()
            );
            self.cache.insert_ids(config, Activity::Inactive, ids);
        }

        Ok(self
            .cache
            .ids(config, Activity::Inactive)
            .unwrap_or_default())
    }

    pub fn author_ids(
        &mut self,
        config: &Configuration,
        activity: Activity,
    ) -> ListingResult<&[AuthorId]> {
        match activity {
            Activity::Active => self.active_author_ids(config),
            Activity::Inactive => self.inactive_author_ids(config),
        }
    }

    /// Resolved profiles for one side of the split, in id order
    pub fn authors<R: AuthorResolver + ?Sized>(
        &mut self,
        config: &Configuration,
        activity: Activity,
        resolver: &R,
    ) -> ListingResult<&[AuthorProfile]> {
        if self.cache.authors(config, activity).is_none() {
            let ids = self.author_ids(config, activity)?.to_vec();
            let authors = resolve_authors(resolver, &ids, config.include_protected_posts())?;
            self.cache.insert_authors(config, activity, authors);
        }

        Ok(self.cache.authors(config, activity).unwrap_or_default())
    }

    pub fn active_authors<R: AuthorResolver + ?Sized>(
        &mut self,
        config: &Configuration,
        resolver: &R,
    ) -> ListingResult<&[AuthorProfile]> {
        self.authors(config, Activity::Active, resolver)
    }

    pub fn inactive_authors<R: AuthorResolver + ?Sized>(
        &mut self,
        config: &Configuration,
        resolver: &R,
    ) -> ListingResult<&[AuthorProfile]> {
        self.authors(config, Activity::Inactive, resolver)
    }
}
