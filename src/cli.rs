use crate::config::{Config, FlagValue, ListingArgs};
use crate::core::activity::Activity;
use crate::core::ListingRequest;
use crate::error::ListingResult;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "authorlist")]
#[command(version, about = "List recently active or inactive post authors")]
pub struct Cli {
    /// JSON snapshot of authors and posts
    #[arg(short, long, value_name = "FILE")]
    pub posts: Option<PathBuf>,

    /// List inactive authors instead of active ones
    #[arg(long)]
    pub inactive: bool,

    /// Length of the activity window in days
    #[arg(short, long)]
    pub days: Option<i64>,

    /// Count password-protected posts as activity
    #[arg(long, value_name = "yes|no")]
    pub include_protected_posts: Option<String>,

    /// Listing arguments as a query string, e.g. "days=14&include_protected_posts=yes"
    #[arg(long, value_name = "QUERY")]
    pub args: Option<String>,

    /// Directory with template overrides
    #[arg(long, value_name = "DIR")]
    pub theme_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.author-listings/config.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Create the default config and theme files
    #[arg(long)]
    pub init: bool,

    /// Print the effective config file contents and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn activity(&self) -> Activity {
        Activity::from_active_flag(!self.inactive)
    }

    /// Layer the flags over the config file: file, then `--args`, then the
    /// individual flags
    pub fn listing_args(&self, base: &ListingArgs) -> ListingResult<ListingArgs> {
        let mut args = base.clone();
        if let Some(query) = &self.args {
            args = args.merge_query(query)?;
        }
        if let Some(days) = self.days {
            args.days = days;
        }
        if let Some(flag) = &self.include_protected_posts {
            args.include_protected_posts = FlagValue::Text(flag.clone());
        }
        Ok(args)
    }

    pub fn request(&self, config: &Config) -> ListingResult<ListingRequest> {
        let configuration = self.listing_args(&config.listing)?.to_configuration()?;
        Ok(ListingRequest::new(self.activity(), configuration))
    }

    /// Theme directory from the flag, else from the config file
    pub fn theme_dir(&self, config: &Config) -> PathBuf {
        self.theme_dir.clone().unwrap_or_else(|| config.themes_dir())
    }
}
