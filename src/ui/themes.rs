use serde::{Deserialize, Serialize};

/// A listing template.
///
/// `item` is rendered once per author and joined with `separator`, then
/// wrapped in `header` and `footer`. `empty` replaces the whole output
/// when there are no authors.
///
/// Item placeholders: `{{id}}`, `{{display_name}}`, `{{nicename}}`,
/// `{{url}}`, `{{posts_url}}`, `{{position}}`. Header, footer and empty
/// text may use `{{count}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    #[serde(default)]
    pub header: String,
    pub item: String,
    #[serde(default)]
    pub separator: String,
    #[serde(default)]
    pub footer: String,
    #[serde(default)]
    pub empty: String,
}

pub struct ThemePresets;

impl ThemePresets {
    /// Names of the templates shipped with the crate
    pub fn builtin_names() -> &'static [&'static str] {
        &["active-authors-list", "inactive-authors-list"]
    }

    pub fn get_template(name: &str) -> Option<TemplateSet> {
        match name {
            "active-authors-list" => Some(Self::active_authors_list()),
            "inactive-authors-list" => Some(Self::inactive_authors_list()),
            _ => None,
        }
    }

    fn active_authors_list() -> TemplateSet {
        TemplateSet {
            header: "<ul class=\"author-listing active-authors\">\n".to_string(),
            item: "  <li class=\"author\"><a href=\"{{posts_url}}\">{{display_name}}</a></li>"
                .to_string(),
            separator: "\n".to_string(),
            footer: "\n</ul>".to_string(),
            empty: "<p class=\"author-listing active-authors empty\">No recently active authors.</p>"
                .to_string(),
        }
    }

    fn inactive_authors_list() -> TemplateSet {
        TemplateSet {
            header: "<ul class=\"author-listing inactive-authors\">\n".to_string(),
            item: "  <li class=\"author\"><a href=\"{{posts_url}}\">{{display_name}}</a></li>"
                .to_string(),
            separator: "\n".to_string(),
            footer: "\n</ul>".to_string(),
            empty: "<p class=\"author-listing inactive-authors empty\">No inactive authors.</p>"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_exist() {
        for name in ThemePresets::builtin_names() {
            let template = ThemePresets::get_template(name).expect("missing builtin");
            assert!(template.item.contains("{{display_name}}"));
            assert!(!template.empty.is_empty());
        }
        assert!(ThemePresets::get_template("sidebar").is_none());
    }

    #[test]
    fn test_template_toml_defaults() {
        let template: TemplateSet =
            toml::from_str(r#"item = "{{display_name}}""#).expect("Failed to parse");
        assert_eq!(template.item, "{{display_name}}");
        assert!(template.header.is_empty());
        assert!(template.separator.is_empty());
        assert!(template.footer.is_empty());
        assert!(template.empty.is_empty());
    }
}
