//! Error types shared by the classifier, the stores and the renderer.

use crate::core::activity::AuthorId;

/// Result type for listing operations
pub type ListingResult<T> = Result<T, ListingError>;

/// Error type for listing operations
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// The post store could not run the query. Not retried here.
    #[error("Post store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Author not found: {0}")]
    AuthorNotFound(AuthorId),

    #[error("Template error: {0}")]
    Template(String),
}

impl ListingError {
    /// Whether the error came from the post store rather than from input
    pub fn is_store_failure(&self) -> bool {
        matches!(self, ListingError::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ListingError::StoreUnavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "Post store unavailable: connection refused");
        assert!(err.is_store_failure());

        let err = ListingError::AuthorNotFound(AuthorId(42));
        assert_eq!(err.to_string(), "Author not found: 42");
        assert!(!err.is_store_failure());

        let err = ListingError::InvalidConfiguration("days must be positive".to_string());
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
