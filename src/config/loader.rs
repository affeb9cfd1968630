use super::types::Config;
use crate::ui::themes::ThemePresets;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of config initialization
#[derive(Debug)]
pub enum InitResult {
    /// Config was created at the given path
    Created(PathBuf),
    /// Config already existed at the given path
    AlreadyExists(PathBuf),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the default config file, falling back to defaults when it is
    /// missing or unreadable
    pub fn load() -> Config {
        Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        })
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write the built-in templates into the themes directory, leaving
    /// existing files untouched. Returns the paths that were created.
    pub fn init_themes_in(themes_dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        fs::create_dir_all(themes_dir)?;

        let mut created = Vec::new();
        for template_name in ThemePresets::builtin_names() {
            let template_path = themes_dir.join(format!("{}.toml", template_name));

            if !template_path.exists() {
                if let Some(template) = ThemePresets::get_template(template_name) {
                    let content = toml::to_string_pretty(&template)?;
                    fs::write(&template_path, content)?;
                    created.push(template_path);
                }
            }
        }

        Ok(created)
    }

    /// Initialize the default themes directory
    pub fn init_themes() -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        Self::init_themes_in(&Self::get_themes_path())
    }

    /// Get the themes directory path (~/.author-listings/themes/)
    pub fn get_themes_path() -> PathBuf {
        Self::base_dir().join("themes")
    }

    fn base_dir() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".author-listings")
        } else {
            PathBuf::from(".author-listings")
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        ConfigLoader::load_from_path(config_path)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(Self::get_config_path())
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.author-listings/config.toml)
    pub fn get_config_path() -> PathBuf {
        ConfigLoader::base_dir().join("config.toml")
    }

    /// Directory searched for template overrides
    pub fn themes_dir(&self) -> PathBuf {
        self.theme_dir
            .clone()
            .unwrap_or_else(ConfigLoader::get_themes_path)
    }

    /// Initialize config directory, built-in themes and default config
    pub fn init() -> Result<InitResult, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        ConfigLoader::init_themes()?;

        if !config_path.exists() {
            Config::default().save()?;
            Ok(InitResult::Created(config_path))
        } else {
            Ok(InitResult::AlreadyExists(config_path))
        }
    }

    /// Validate configuration
    pub fn check(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.listing.to_configuration()?;
        self.check_theme_dir()
    }

    /// Validate only the non-listing settings, for callers that layer
    /// their own listing arguments over the file
    pub fn check_theme_dir(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(dir) = &self.theme_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(format!("theme_dir is not a directory: {}", dir.display()).into());
            }
        }

        Ok(())
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }
}
