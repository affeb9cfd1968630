pub mod activity;
pub mod listing;

pub use activity::{ActivityClassifier, AuthorResolver, ListingCache};
pub use listing::{AuthorListing, ListingRequest};
