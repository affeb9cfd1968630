//! Per-classifier memoization of author listings
//!
//! Each [`Configuration`] gets its own entry holding the cut-off instant
//! and up to four lazily filled slots: active ids, inactive ids, active
//! authors and inactive authors. A filled slot is returned as-is until the
//! entry is invalidated, even if the post store has changed since.
//!
//! The cache lives only as long as its owner; nothing is written to disk.

use super::types::{Activity, AuthorId, AuthorProfile};
use crate::config::Configuration;
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashMap;

/// Cached values for one configuration
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Cut-off instant shared by every query of this configuration
    pub cut_off: DateTime<Utc>,
    active_ids: Option<Vec<AuthorId>>,
    inactive_ids: Option<Vec<AuthorId>>,
    active_authors: Option<Vec<AuthorProfile>>,
    inactive_authors: Option<Vec<AuthorProfile>>,
}

impl CacheEntry {
    pub fn new(cut_off: DateTime<Utc>) -> Self {
        Self {
            cut_off,
            active_ids: None,
            inactive_ids: None,
            active_authors: None,
            inactive_authors: None,
        }
    }

    fn ids_slot(&mut self, activity: Activity) -> &mut Option<Vec<AuthorId>> {
        match activity {
            Activity::Active => &mut self.active_ids,
            Activity::Inactive => &mut self.inactive_ids,
        }
    }

    fn authors_slot(&mut self, activity: Activity) -> &mut Option<Vec<AuthorProfile>> {
        match activity {
            Activity::Active => &mut self.active_authors,
            Activity::Inactive => &mut self.inactive_authors,
        }
    }

    pub fn ids(&self, activity: Activity) -> Option<&[AuthorId]> {
        match activity {
            Activity::Active => self.active_ids.as_deref(),
            Activity::Inactive => self.inactive_ids.as_deref(),
        }
    }

    pub fn authors(&self, activity: Activity) -> Option<&[AuthorProfile]> {
        match activity {
            Activity::Active => self.active_authors.as_deref(),
            Activity::Inactive => self.inactive_authors.as_deref(),
        }
    }
}

/// Listing cache keyed by configuration
#[derive(Debug, Clone, Default)]
pub struct ListingCache {
    entries: HashMap<Configuration, CacheEntry>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cut-off for `config`, creating the entry with `now()` on first use
    pub fn cut_off_or_insert<F>(&mut self, config: &Configuration, now: F) -> DateTime<Utc>
    where
        F: FnOnce() -> DateTime<Utc>,
    {
        self.entries
            .entry(*config)
            .or_insert_with(|| {
                let cut_off = config.cut_off_time(now());
                debug!(
                    "new listing cache entry: days={} protected={} cut_off={}",
                    config.cut_off_days(),
                    config.include_protected_posts(),
                    cut_off
                );
                CacheEntry::new(cut_off)
            })
            .cut_off
    }

    pub fn entry(&self, config: &Configuration) -> Option<&CacheEntry> {
        self.entries.get(config)
    }

    pub fn ids(&self, config: &Configuration, activity: Activity) -> Option<&[AuthorId]> {
        self.entries.get(config)?.ids(activity)
    }

    pub fn authors(&self, config: &Configuration, activity: Activity) -> Option<&[AuthorProfile]> {
        self.entries.get(config)?.authors(activity)
    }

    /// Store an id set. Ignored when the entry was never created, since the
    /// ids would have no cut-off to belong to.
    pub fn insert_ids(&mut self, config: &Configuration, activity: Activity, ids: Vec<AuthorId>) {
        if let Some(entry) = self.entries.get_mut(config) {
            *entry.ids_slot(activity) = Some(ids);
        }
    }

    /// Store a resolved author list. Same rule as [`ListingCache::insert_ids`].
    pub fn insert_authors(
        &mut self,
        config: &Configuration,
        activity: Activity,
        authors: Vec<AuthorProfile>,
    ) {
        if let Some(entry) = self.entries.get_mut(config) {
            *entry.authors_slot(activity) = Some(authors);
        }
    }

    /// Drop every entry
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            debug!("invalidating {} listing cache entries", self.entries.len());
        }
        self.entries.clear();
    }

    /// Drop the entry for one configuration. Returns whether it existed.
    pub fn invalidate_config(&mut self, config: &Configuration) -> bool {
        self.entries.remove(config).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
