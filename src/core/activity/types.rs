//! Author activity data structures
//!
//! This module defines the records read from a post store, the resolved
//! author profiles handed to templates, and the active/inactive split.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a post author
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub u64);

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Publish,
    Draft,
    Pending,
    Private,
    Future,
    Trash,
    #[serde(other)]
    Other,
}

/// Kind of content a post record holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Post,
    Page,
    Attachment,
    Revision,
    #[serde(other)]
    Other,
}

/// A single post as held by the post store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: u64,
    pub author: AuthorId,
    #[serde(default)]
    pub title: String,
    /// Publication instant in UTC
    pub published_at: DateTime<Utc>,
    pub status: PostStatus,
    pub post_type: PostType,
    /// Post password; absent and empty both mean "not protected"
    #[serde(default)]
    pub password: Option<String>,
}

impl PostRecord {
    /// Create a published, unprotected post
    pub fn published(id: u64, author: AuthorId, published_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author,
            title: String::new(),
            published_at,
            status: PostStatus::Publish,
            post_type: PostType::Post,
            password: None,
        }
    }

    /// Builder method to set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder method to password-protect the post
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Builder method to set the status
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder method to set the post type
    pub fn with_type(mut self, post_type: PostType) -> Self {
        self.post_type = post_type;
        self
    }

    pub fn is_password_protected(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Published post of type `post`, ignoring password protection
    pub fn is_published_post(&self) -> bool {
        self.status == PostStatus::Publish && self.post_type == PostType::Post
    }

    /// Whether the post counts towards author activity
    pub fn is_eligible(&self, include_protected_posts: bool) -> bool {
        self.is_published_post() && (include_protected_posts || !self.is_password_protected())
    }
}

/// Which side of the cut-off a listing covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Active,
    Inactive,
}

impl Activity {
    /// Name of the template used to render this listing
    pub fn template_name(&self) -> &'static str {
        match self {
            Activity::Active => "active-authors-list",
            Activity::Inactive => "inactive-authors-list",
        }
    }

    pub fn from_active_flag(active: bool) -> Self {
        if active {
            Activity::Active
        } else {
            Activity::Inactive
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Active => f.write_str("active"),
            Activity::Inactive => f.write_str("inactive"),
        }
    }
}

/// Displayable author, as produced by an author resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: AuthorId,
    pub display_name: String,
    /// URL-safe author slug
    pub nicename: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Carried through to this author's own post listing
    #[serde(default)]
    pub include_protected_posts: bool,
}
