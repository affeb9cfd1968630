//! Template rendering for author listings
//!
//! [`TemplateRenderer`] looks for `<theme_dir>/<template_name>.toml` first
//! and falls back to the built-in template of the same name, so a theme can
//! override either listing without touching the other.

use super::themes::{TemplateSet, ThemePresets};
use crate::core::activity::AuthorProfile;
use crate::error::{ListingError, ListingResult};
use log::debug;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Variables handed to a template
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub authors: &'a [AuthorProfile],
}

/// Turns resolved authors into output
pub trait Renderer {
    fn render(&self, template_name: &str, vars: &TemplateVars<'_>) -> ListingResult<String>;
}

impl<T: Renderer + ?Sized> Renderer for &T {
    fn render(&self, template_name: &str, vars: &TemplateVars<'_>) -> ListingResult<String> {
        (**self).render(template_name, vars)
    }
}

const ITEM_PLACEHOLDERS: &[&str] = &[
    "id",
    "display_name",
    "nicename",
    "url",
    "posts_url",
    "position",
];
const FRAME_PLACEHOLDERS: &[&str] = &["count"];

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").expect("placeholder regex should compile")
    })
}

/// Renders listings from TOML templates with theme overrides
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    theme_dir: Option<PathBuf>,
}

impl TemplateRenderer {
    /// Renderer using only the built-in templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that prefers templates found in `dir`
    pub fn with_theme_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            theme_dir: Some(dir.into()),
        }
    }

    pub fn theme_dir(&self) -> Option<&Path> {
        self.theme_dir.as_deref()
    }

    /// Find a template by name: theme override first, then built-in
    pub fn load_template(&self, name: &str) -> ListingResult<TemplateSet> {
        if !is_valid_template_name(name) {
            return Err(ListingError::Template(format!(
                "invalid template name '{}'",
                name
            )));
        }

        let template = match self.override_path(name) {
            Some(path) => {
                debug!("using template override {}", path.display());
                let content = fs::read_to_string(&path).map_err(|e| {
                    ListingError::Template(format!("cannot read {}: {}", path.display(), e))
                })?;
                toml::from_str(&content).map_err(|e| {
                    ListingError::Template(format!("cannot parse {}: {}", path.display(), e))
                })?
            }
            None => ThemePresets::get_template(name)
                .ok_or_else(|| ListingError::Template(format!("unknown template '{}'", name)))?,
        };

        validate_template(name, &template)?;
        Ok(template)
    }

    fn override_path(&self, name: &str) -> Option<PathBuf> {
        let path = self.theme_dir.as_ref()?.join(format!("{}.toml", name));
        path.is_file().then_some(path)
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, template_name: &str, vars: &TemplateVars<'_>) -> ListingResult<String> {
        let template = self.load_template(template_name)?;
        Ok(render_template(&template, vars))
    }
}

/// Template names are used as file names, so keep them to a safe alphabet
fn is_valid_template_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn validate_template(name: &str, template: &TemplateSet) -> ListingResult<()> {
    let parts = [
        (template.item.as_str(), ITEM_PLACEHOLDERS),
        (template.header.as_str(), FRAME_PLACEHOLDERS),
        (template.separator.as_str(), &[][..]),
        (template.footer.as_str(), FRAME_PLACEHOLDERS),
        (template.empty.as_str(), FRAME_PLACEHOLDERS),
    ];

    for (text, allowed) in parts {
        for caps in placeholder_regex().captures_iter(text) {
            let key = &caps[1];
            if !allowed.contains(&key) {
                return Err(ListingError::Template(format!(
                    "template '{}' uses unknown placeholder '{{{{{}}}}}'",
                    name, key
                )));
            }
        }
    }
    Ok(())
}

/// Render a template against a list of authors
pub fn render_template(template: &TemplateSet, vars: &TemplateVars<'_>) -> String {
    let count = vars.authors.len().to_string();
    let frame = |text: &str| {
        placeholder_regex()
            .replace_all(text, |caps: &Captures| match &caps[1] {
                "count" => count.clone(),
                _ => String::new(),
            })
            .into_owned()
    };

    if vars.authors.is_empty() {
        return frame(&template.empty);
    }

    let items: Vec<String> = vars
        .authors
        .iter()
        .enumerate()
        .map(|(index, author)| render_item(&template.item, author, index + 1))
        .collect();

    format!(
        "{}{}{}",
        frame(&template.header),
        items.join(&template.separator),
        frame(&template.footer)
    )
}

fn render_item(item: &str, author: &AuthorProfile, position: usize) -> String {
    let posts_url = format!("/author/{}/", author.nicename);
    placeholder_regex()
        .replace_all(item, |caps: &Captures| {
            let value = match &caps[1] {
                "id" => author.id.to_string(),
                "display_name" => author.display_name.clone(),
                "nicename" => author.nicename.clone(),
                "url" => author.url.clone().unwrap_or_else(|| posts_url.clone()),
                "posts_url" => posts_url.clone(),
                "position" => position.to_string(),
                _ => String::new(),
            };
            escape_html(&value)
        })
        .into_owned()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
