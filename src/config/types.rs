use crate::error::{ListingError, ListingResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::form_urlencoded;

/// Default trailing activity window, in days
pub const DEFAULT_CUT_OFF_DAYS: u32 = 30;

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Validated classification settings.
///
/// Fields are private so a value cannot change once it has been used to
/// classify; build a new one instead. Equal configurations share cache
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Configuration {
    cut_off_days: u32,
    include_protected_posts: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            cut_off_days: DEFAULT_CUT_OFF_DAYS,
            include_protected_posts: false,
        }
    }
}

impl Configuration {
    /// Create a configuration, rejecting a non-positive day count
    pub fn new(cut_off_days: i64, include_protected_posts: bool) -> ListingResult<Self> {
        if cut_off_days <= 0 {
            return Err(ListingError::InvalidConfiguration(format!(
                "days must be a positive integer, got {}",
                cut_off_days
            )));
        }
        let cut_off_days = u32::try_from(cut_off_days).map_err(|_| {
            ListingError::InvalidConfiguration(format!("days is too large: {}", cut_off_days))
        })?;

        Ok(Self {
            cut_off_days,
            include_protected_posts,
        })
    }

    pub fn cut_off_days(&self) -> u32 {
        self.cut_off_days
    }

    pub fn include_protected_posts(&self) -> bool {
        self.include_protected_posts
    }

    /// Builder method returning a copy with a different protection flag
    pub fn with_protected_posts(mut self, include: bool) -> Self {
        self.include_protected_posts = include;
        self
    }

    /// Start of the activity window: `now` minus `cut_off_days` whole days.
    /// Saturates at the earliest representable instant.
    pub fn cut_off_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(Duration::seconds(
            SECONDS_PER_DAY * i64::from(self.cut_off_days),
        ))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// A protection flag as written by a caller: a real boolean or a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

impl Default for FlagValue {
    fn default() -> Self {
        FlagValue::Bool(false)
    }
}

impl FlagValue {
    /// Normalize to a boolean, rejecting unrecognized words
    pub fn to_bool(&self) -> ListingResult<bool> {
        match self {
            FlagValue::Bool(b) => Ok(*b),
            FlagValue::Text(text) => parse_flag(text),
        }
    }
}

/// Parse `yes`/`no`, `true`/`false` or `1`/`0`, ignoring case and padding
pub fn parse_flag(value: &str) -> ListingResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        other => Err(ListingError::InvalidConfiguration(format!(
            "include_protected_posts must be yes or no, got '{}'",
            other
        ))),
    }
}

/// Loosely typed listing arguments, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingArgs {
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default)]
    pub include_protected_posts: FlagValue,
}

fn default_days() -> i64 {
    i64::from(DEFAULT_CUT_OFF_DAYS)
}

impl Default for ListingArgs {
    fn default() -> Self {
        Self {
            days: default_days(),
            include_protected_posts: FlagValue::default(),
        }
    }
}

impl ListingArgs {
    /// Parse a query-string style argument list such as
    /// `days=14&include_protected_posts=yes`. Pairs are form-urlencoded.
    /// Missing keys keep their defaults; unknown keys are rejected.
    pub fn parse(args: &str) -> ListingResult<Self> {
        Self::default().merge_query(args)
    }

    /// Apply a query-string argument list on top of these arguments
    pub fn merge_query(mut self, args: &str) -> ListingResult<Self> {
        let query = args.trim().trim_start_matches('?');
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.trim() {
                "" => continue,
                "days" => {
                    self.days = value.trim().parse().map_err(|_| {
                        ListingError::InvalidConfiguration(format!(
                            "days must be an integer, got '{}'",
                            value
                        ))
                    })?;
                }
                "include_protected_posts" => {
                    self.include_protected_posts = FlagValue::Text(value.into_owned());
                }
                other => {
                    return Err(ListingError::InvalidConfiguration(format!(
                        "unknown listing argument '{}'",
                        other
                    )));
                }
            }
        }
        Ok(self)
    }

    /// Validate into a [`Configuration`]
    pub fn to_configuration(&self) -> ListingResult<Configuration> {
        let include = self.include_protected_posts.to_bool()?;
        Configuration::new(self.days, include)
    }
}

/// On-disk configuration (`~/.author-listings/config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding template overrides; the built-in themes directory
    /// is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_dir: Option<PathBuf>,
    /// Default listing arguments
    #[serde(default)]
    pub listing: ListingArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.cut_off_days(), 30);
        assert!(!config.include_protected_posts());
    }

    #[test]
    fn test_rejects_non_positive_days() {
        assert!(matches!(
            Configuration::new(0, false),
            Err(ListingError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Configuration::new(-3, true),
            Err(ListingError::InvalidConfiguration(_))
        ));
        assert!(Configuration::new(1, false).is_ok());
    }

    #[test]
    fn test_cut_off_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 8, 30, 0).unwrap();
        let config = Configuration::new(30, false).unwrap();
        assert_eq!(
            config.cut_off_time(now),
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("yes").unwrap());
        assert!(parse_flag(" YES ").unwrap());
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("no").unwrap());
        assert!(!parse_flag("False").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("maybe").is_err());
        assert!(parse_flag("").is_err());
    }

    #[test]
    fn test_listing_args_defaults() {
        let args = ListingArgs::parse("").unwrap();
        assert_eq!(args, ListingArgs::default());
        assert_eq!(args.to_configuration().unwrap(), Configuration::default());
    }

    #[test]
    fn test_listing_args_query() {
        let args = ListingArgs::parse("days=14&include_protected_posts=yes").unwrap();
        assert_eq!(args.days, 14);
        let config = args.to_configuration().unwrap();
        assert_eq!(config.cut_off_days(), 14);
        assert!(config.include_protected_posts());

        let args = ListingArgs::parse("?include_protected_posts=no").unwrap();
        assert_eq!(args.days, 30);
        assert!(!args.to_configuration().unwrap().include_protected_posts());
    }

    #[test]
    fn test_listing_args_urlencoded() {
        let args = ListingArgs::parse("days=%31%34&include_protected_posts=y%65s").unwrap();
        assert_eq!(args.days, 14);
        assert!(args.to_configuration().unwrap().include_protected_posts());

        let args = ListingArgs::parse("include_protected_posts=yes+&days=+7").unwrap();
        let config = args.to_configuration().unwrap();
        assert_eq!(config.cut_off_days(), 7);
        assert!(config.include_protected_posts());

        assert_eq!(ListingArgs::parse("d%61ys=3").unwrap().days, 3);
        assert!(ListingArgs::parse("col%6Fur=blue").is_err());
    }

    #[test]
    fn test_listing_args_rejects_bad_input() {
        assert!(ListingArgs::parse("days=soon").is_err());
        assert!(ListingArgs::parse("colour=blue").is_err());

        let args = ListingArgs::parse("include_protected_posts=perhaps").unwrap();
        assert!(args.to_configuration().is_err());

        let args = ListingArgs::parse("days=0").unwrap();
        assert!(args.to_configuration().is_err());
    }

    #[test]
    fn test_config_toml() {
        let config: Config = toml::from_str(
            r#"
            [listing]
            days = 60
            include_protected_posts = "yes"
            "#,
        )
        .expect("Failed to parse");
        assert_eq!(config.listing.days, 60);
        let listing = config.listing.to_configuration().unwrap();
        assert!(listing.include_protected_posts());
        assert!(config.theme_dir.is_none());

        let config: Config = toml::from_str(
            r#"
            theme_dir = "/srv/themes"
            [listing]
            include_protected_posts = true
            "#,
        )
        .expect("Failed to parse");
        assert_eq!(config.listing.days, 30);
        assert_eq!(config.theme_dir, Some(PathBuf::from("/srv/themes")));
        let listing = config.listing.to_configuration().unwrap();
        assert!(listing.include_protected_posts());
    }

    #[test]
    fn test_config_rejects_unknown_listing_key() {
        let parsed: Result<Config, _> = toml::from_str(
            r#"
            [listing]
            dayz = 60
            "#,
        );
        assert!(parsed.is_err());
    }
}
