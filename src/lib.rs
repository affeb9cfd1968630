pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod store;
pub mod ui;

pub use error::{ListingError, ListingResult};
