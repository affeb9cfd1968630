//! Listing dispatcher
//!
//! Picks the active or inactive author list and hands it to a renderer
//! under the matching template name.
//!
//! # Example Usage
//!
//! ```ignore
//! use author_listings::core::AuthorListing;
//! use author_listings::store::MemoryPostStore;
//! use author_listings::ui::TemplateRenderer;
//!
//! let store = MemoryPostStore::load_json("posts.json")?;
//! let mut listing = AuthorListing::new(store.clone(), store, TemplateRenderer::new());
//!
//! println!("{}", listing.list_active_authors("days=14")?);
//! println!("{}", listing.list_inactive_authors("include_protected_posts=yes")?);
//! ```

use super::activity::{Activity, ActivityClassifier, AuthorResolver, Clock, SystemClock};
use crate::config::{Configuration, ListingArgs};
use crate::error::ListingResult;
use crate::store::PostStore;
use crate::ui::{Renderer, TemplateVars};
use log::info;

/// One listing to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingRequest {
    pub activity: Activity,
    pub config: Configuration,
}

impl ListingRequest {
    pub fn new(activity: Activity, config: Configuration) -> Self {
        Self { activity, config }
    }

    pub fn active(config: Configuration) -> Self {
        Self::new(Activity::Active, config)
    }

    pub fn inactive(config: Configuration) -> Self {
        Self::new(Activity::Inactive, config)
    }

    /// Build a request from query-string arguments, see [`ListingArgs::parse`]
    pub fn from_args(activity: Activity, args: &str) -> ListingResult<Self> {
        let config = ListingArgs::parse(args)?.to_configuration()?;
        Ok(Self::new(activity, config))
    }
}

/// Caller-owned listing facade: a classifier plus the resolver and
/// renderer it feeds.
pub struct AuthorListing<S, R, T, C = SystemClock> {
    classifier: ActivityClassifier<S, C>,
    resolver: R,
    renderer: T,
}

impl<S: PostStore, R: AuthorResolver, T: Renderer> AuthorListing<S, R, T> {
    pub fn new(store: S, resolver: R, renderer: T) -> Self {
        Self::with_classifier(ActivityClassifier::new(store), resolver, renderer)
    }
}

impl<S, R, T, C> AuthorListing<S, R, T, C>
where
    S: PostStore,
    R: AuthorResolver,
    T: Renderer,
    C: Clock,
{
    pub fn with_classifier(classifier: ActivityClassifier<S, C>, resolver: R, renderer: T) -> Self {
        Self {
            classifier,
            resolver,
            renderer,
        }
    }

    pub fn classifier(&self) -> &ActivityClassifier<S, C> {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut ActivityClassifier<S, C> {
        &mut self.classifier
    }

    /// Render the requested listing
    pub fn list_authors(&mut self, request: &ListingRequest) -> ListingResult<String> {
        let template_name = request.activity.template_name();
        let authors = self
            .classifier
            .authors(&request.config, request.activity, &self.resolver)?;

        info!(
            "rendering {} {} authors with template '{}' (days={}, protected={})",
            authors.len(),
            request.activity,
            template_name,
            request.config.cut_off_days(),
            request.config.include_protected_posts()
        );
        self.renderer.render(template_name, &TemplateVars { authors })
    }

    /// Render active authors from query-string arguments
    pub fn list_active_authors(&mut self, args: &str) -> ListingResult<String> {
        let request = ListingRequest::from_args(Activity::Active, args)?;
        self.list_authors(&request)
    }

    /// Render inactive authors from query-string arguments
    pub fn list_inactive_authors(&mut self, args: &str) -> ListingResult<String> {
        let request = ListingRequest::from_args(Activity::Inactive, args)?;
        self.list_authors(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::activity::{AuthorId, FixedClock, PostRecord};
    use crate::error::ListingError;
    use crate::store::{AuthorRecord, MemoryPostStore};
    use crate::ui::TemplateRenderer;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::cell::RefCell;

    /// Renderer that records what it was asked to render
    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, template_name: &str, vars: &TemplateVars<'_>) -> ListingResult<String> {
            let names = vars.authors.iter().map(|a| a.display_name.clone()).collect();
            self.calls.borrow_mut().push((template_name.to_string(), names));
            Ok(template_name.to_string())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn store() -> MemoryPostStore {
        let store = MemoryPostStore::new();
        store.insert_author(AuthorRecord::new(AuthorId(1), "Alice")).unwrap();
        store.insert_author(AuthorRecord::new(AuthorId(2), "Bob")).unwrap();
        store.insert_author(AuthorRecord::new(AuthorId(3), "Carol")).unwrap();
        store
            .insert_post(PostRecord::published(1, AuthorId(1), now() - Duration::days(5)))
            .unwrap();
        store
            .insert_post(PostRecord::published(2, AuthorId(2), now() - Duration::days(40)))
            .unwrap();
        store
            .insert_post(
                PostRecord::published(3, AuthorId(3), now() - Duration::days(1))
                    .with_password("pw"),
            )
            .unwrap();
        store
            .insert_post(PostRecord::published(4, AuthorId(3), now() - Duration::days(45)))
            .unwrap();
        store
    }

    fn listing<T: Renderer>(
        store: &MemoryPostStore,
        renderer: T,
    ) -> AuthorListing<MemoryPostStore, MemoryPostStore, T, FixedClock> {
        let classifier = ActivityClassifier::with_clock(store.clone(), FixedClock(now()));
        AuthorListing::with_classifier(classifier, store.clone(), renderer)
    }

    #[test]
    fn test_dispatch_selects_template_and_list() {
        let store = store();
        let renderer = RecordingRenderer::default();
        let mut listing = listing(&store, &renderer);

        assert_eq!(listing.list_active_authors("").unwrap(), "active-authors-list");
        assert_eq!(listing.list_inactive_authors("").unwrap(), "inactive-authors-list");

        let calls = renderer.calls.borrow();
        assert_eq!(calls[0].1, vec!["Alice".to_string()]);
        assert_eq!(calls[1].1, vec!["Bob".to_string(), "Carol".to_string()]);
    }

    #[test]
    fn test_args_are_normalized() {
        let store = store();
        let renderer = RecordingRenderer::default();
        let mut listing = listing(&store, &renderer);

        listing.list_active_authors("include_protected_posts=yes").unwrap();
        listing
            .list_inactive_authors("days=30&include_protected_posts=yes")
            .unwrap();

        let calls = renderer.calls.borrow();
        assert_eq!(calls[0].1, vec!["Carol".to_string(), "Alice".to_string()]);
        assert_eq!(calls[1].1, vec!["Bob".to_string()]);
    }

    #[test]
    fn test_invalid_args_abort_before_rendering() {
        let store = store();
        let renderer = RecordingRenderer::default();
        let mut listing = listing(&store, &renderer);

        let err = listing.list_active_authors("days=-1").unwrap_err();
        assert!(matches!(err, ListingError::InvalidConfiguration(_)));
        let err = listing
            .list_active_authors("include_protected_posts=sometimes")
            .unwrap_err();
        assert!(matches!(err, ListingError::InvalidConfiguration(_)));
        assert!(renderer.calls.borrow().is_empty());
    }

    #[test]
    fn test_store_failure_aborts_render() {
        let store = store();
        let renderer = RecordingRenderer::default();
        let mut listing = listing(&store, &renderer);
        store.set_available(false).unwrap();

        let err = listing
            .list_authors(&ListingRequest::active(Configuration::default()))
            .unwrap_err();
        assert!(err.is_store_failure());
        assert!(renderer.calls.borrow().is_empty());
    }

    #[test]
    fn test_renders_html_with_builtin_templates() {
        let store = store();
        let mut html_listing = listing(&store, TemplateRenderer::new());

        let html = html_listing
            .list_authors(&ListingRequest::inactive(Configuration::default()))
            .unwrap();
        assert!(html.starts_with("<ul class=\"author-listing inactive-authors\">"));
        assert!(html.contains(">Bob</a>"));
        assert!(html.contains(">Carol</a>"));
        assert!(!html.contains("Alice"));

        let empty_store = MemoryPostStore::new();
        let mut empty_listing = listing(&empty_store, TemplateRenderer::new());
        let html = empty_listing.list_active_authors("").unwrap();
        assert!(html.contains("No recently active authors."));
    }

    #[test]
    fn test_override_template_renders_author_urls() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join("active-authors-list.toml"),
            r#"
            item = "{{display_name}} <{{url}}>"
            separator = "; "
            empty = "nobody"
            "#,
        )
        .expect("Failed to write");

        let store = MemoryPostStore::new();
        let shelley =
            AuthorRecord::new(AuthorId(7), "Mary Shelley").with_url("https://shelley.example");
        store.insert_author(shelley).unwrap();
        let renderer = TemplateRenderer::with_theme_dir(dir.path());
        let mut url_listing = listing(&store, renderer);
        assert_eq!(url_listing.list_active_authors("").unwrap(), "nobody");

        let recent = now() - Duration::days(2);
        store.insert_post(PostRecord::published(1, AuthorId(7), recent)).unwrap();
        assert_eq!(url_listing.list_active_authors("").unwrap(), "nobody");

        url_listing.classifier_mut().invalidate();
        assert_eq!(
            url_listing.list_active_authors("").unwrap(),
            "Mary Shelley <https://shelley.example>"
        );
        assert_eq!(url_listing.classifier().cache().len(), 1);
    }

    #[test]
    fn test_request_builders() {
        let request = ListingRequest::from_args(Activity::Inactive, "days=7").unwrap();
        assert_eq!(request.activity, Activity::Inactive);
        assert_eq!(request.config.cut_off_days(), 7);
        assert_eq!(
            ListingRequest::active(Configuration::default()).activity,
            Activity::Active
        );
    }
}
