pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, InitResult};
pub use types::{parse_flag, Config, Configuration, FlagValue, ListingArgs, DEFAULT_CUT_OFF_DAYS};
