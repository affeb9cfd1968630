//! In-memory post store.
//!
//! Holds posts and author records behind a shared lock so clones of the
//! store see the same data. Suitable for tests, local development and the
//! command-line front end, which loads it from a JSON snapshot.

use super::{AuthorQuery, PostStore};
use crate::core::activity::{AuthorId, AuthorProfile, AuthorResolver, PostRecord};
use crate::error::{ListingError, ListingResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A user who may author posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: AuthorId,
    pub display_name: String,
    /// Slug used in author URLs; derived from the display name when empty
    #[serde(default)]
    pub nicename: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl AuthorRecord {
    pub fn new(id: AuthorId, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            id,
            nicename: slugify(&display_name),
            display_name,
            url: None,
        }
    }

    /// Builder method to set the author's URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Serialized form of a store's contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub authors: Vec<AuthorRecord>,
    #[serde(default)]
    pub posts: Vec<PostRecord>,
}

struct MemoryData {
    posts: Vec<PostRecord>,
    authors: HashMap<AuthorId, AuthorRecord>,
    available: bool,
}

impl Default for MemoryData {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            authors: HashMap::new(),
            available: true,
        }
    }
}

/// In-memory post store and author directory
#[derive(Clone, Default)]
pub struct MemoryPostStore {
    data: Arc<RwLock<MemoryData>>,
}

impl MemoryPostStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        if let Ok(mut data) = store.data.write() {
            data.authors = snapshot
                .authors
                .into_iter()
                .map(|author| (author.id, author))
                .collect();
            data.posts = snapshot.posts;
        }
        store
    }

    /// Load a store from a JSON snapshot file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Copy the current contents out as a snapshot, authors sorted by id
    pub fn snapshot(&self) -> ListingResult<Snapshot> {
        let data = self.read()?;
        let mut authors: Vec<AuthorRecord> = data.authors.values().cloned().collect();
        authors.sort_by_key(|a| a.id);
        Ok(Snapshot {
            authors,
            posts: data.posts.clone(),
        })
    }

    pub fn insert_author(&self, author: AuthorRecord) -> ListingResult<()> {
        self.write()?.authors.insert(author.id, author);
        Ok(())
    }

    pub fn insert_post(&self, post: PostRecord) -> ListingResult<()> {
        self.write()?.posts.push(post);
        Ok(())
    }

    /// Remove every post with the given id. Returns how many were removed.
    pub fn remove_post(&self, post_id: u64) -> ListingResult<usize> {
        let mut data = self.write()?;
        let before = data.posts.len();
        data.posts.retain(|p| p.id != post_id);
        Ok(before - data.posts.len())
    }

    pub fn post_count(&self) -> ListingResult<usize> {
        Ok(self.read()?.posts.len())
    }

    /// Simulate the backing store going away (or coming back)
    pub fn set_available(&self, available: bool) -> ListingResult<()> {
        self.write()?.available = available;
        Ok(())
    }

    fn read(&self) -> ListingResult<RwLockReadGuard<'_, MemoryData>> {
        self.data
            .read()
            .map_err(|_| ListingError::StoreUnavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> ListingResult<RwLockWriteGuard<'_, MemoryData>> {
        self.data
            .write()
            .map_err(|_| ListingError::StoreUnavailable("store lock poisoned".to_string()))
    }

    /// Read access for queries; fails while the store is marked unavailable
    fn query(&self) -> ListingResult<RwLockReadGuard<'_, MemoryData>> {
        let data = self.read()?;
        if !data.available {
            return Err(ListingError::StoreUnavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(data)
    }
}

impl PostStore for MemoryPostStore {
    fn author_ids(&self, query: &AuthorQuery<'_>) -> ListingResult<Vec<AuthorId>> {
        let data = self.query()?;

        let mut matching: Vec<&PostRecord> =
            data.posts.iter().filter(|p| query.matches(p)).collect();
        // Stable sort keeps insertion order among posts published together
        matching.sort_by_key(|p| Reverse(p.published_at));

        let mut seen = HashSet::new();
        let ids: Vec<AuthorId> = matching
            .into_iter()
            .map(|p| p.author)
            .filter(|id| seen.insert(*id))
            .collect();

        debug!(
            "author query {:?} at {} returned {} authors",
            query.direction,
            query.cut_off,
            ids.len()
        );
        Ok(ids)
    }

    fn posts_by_author(
        &self,
        author: AuthorId,
        include_protected_posts: bool,
    ) -> ListingResult<Vec<PostRecord>> {
        let data = self.query()?;

        let mut posts: Vec<PostRecord> = data
            .posts
            .iter()
            .filter(|p| p.author == author && p.is_eligible(include_protected_posts))
            .cloned()
            .collect();
        posts.sort_by_key(|p| Reverse(p.published_at));
        Ok(posts)
    }
}

impl AuthorResolver for MemoryPostStore {
    fn resolve(&self, id: AuthorId, include_protected_posts: bool) -> ListingResult<AuthorProfile> {
        let data = self.query()?;
        let author = data.authors.get(&id).ok_or(ListingError::AuthorNotFound(id))?;

        let nicename = if author.nicename.is_empty() {
            slugify(&author.display_name)
        } else {
            author.nicename.clone()
        };

        Ok(AuthorProfile {
            id,
            display_name: author.display_name.clone(),
            nicename,
            url: author.url.clone(),
            include_protected_posts,
        })
    }
}
