//! Stylesheet output for generated icon components
//!
//! [`Stylesheet`] is the [`PluginApi`] implementation used by the CLI. Static
//! components are written as-is. Color-matched components are expanded once per
//! palette color, producing `.bg-set-icon-<color>` classes.

use std::fmt::Write;

use indexmap::IndexMap;

use crate::config::ColorValue;
use crate::css::CssRule;
use crate::error::PluginError;
use crate::plugin::{BackgroundComponents, Components, PluginApi};

/// Palette used when the configuration defines no colors
const DEFAULT_PALETTE: [(&str, &str); 5] = [
    ("current", "currentColor"),
    ("inherit", "inherit"),
    ("transparent", "transparent"),
    ("black", "#000"),
    ("white", "#fff"),
];

/// Flat color palette: utility suffix to CSS color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub colors: IndexMap<String, String>,
}

impl Palette {
    /// Flatten nested shades into `parent-child` names; a `DEFAULT` shade takes
    /// the parent's name
    pub fn from_colors(colors: &IndexMap<String, ColorValue>) -> Self {
        let mut flat = IndexMap::new();
        for (name, value) in colors {
            flatten_into(&mut flat, name, value);
        }
        Self { colors: flat }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }
}

fn flatten_into(flat: &mut IndexMap<String, String>, name: &str, value: &ColorValue) {
    match value {
        ColorValue::Color(color) => {
            flat.insert(name.to_string(), color.clone());
        }
        ColorValue::Shades(shades) => {
            for (shade, value) in shades {
                let child = if shade == "DEFAULT" {
                    name.to_string()
                } else {
                    format!("{name}-{shade}")
                };
                flatten_into(flat, &child, value);
            }
        }
    }
}

/// Escape a class name for use in a selector
pub fn escape_class_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        let plain = c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii();
        if !plain || (i == 0 && c.is_ascii_digit()) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Collects components and renders them as CSS text
#[derive(Debug, Default)]
pub struct Stylesheet {
    palette: Palette,
    rules: Vec<(String, CssRule)>,
    errors: Vec<String>,
}

impl Stylesheet {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Messages of every reported error
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of rules collected so far
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Render every collected rule, in registration order
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (selector, rule) in &self.rules {
            if !css.is_empty() {
                css.push('\n');
            }
            write_rule(&mut css, selector, rule);
        }
        css
    }
}

fn write_rule(out: &mut String, selector: &str, rule: &CssRule) {
    let _ = writeln!(out, "{selector} {{");
    for (property, value) in rule {
        let _ = writeln!(out, "  {property}: {value};");
    }
    out.push_str("}\n");
}

fn class_selector(key: &str) -> String {
    let class = key.strip_prefix('.').unwrap_or(key);
    format!(".{}", escape_class_name(class))
}

impl PluginApi for Stylesheet {
    fn add_components(&mut self, components: Components) {
        for (key, rule) in components {
            self.rules.push((class_selector(&key), rule));
        }
    }

    fn match_components(&mut self, components: BackgroundComponents) {
        for (key, color_fn) in components {
            for (color_name, color) in &self.palette.colors {
                let selector = class_selector(&format!("{key}-{color_name}"));
                self.rules.push((selector, color_fn(color)));
            }
        }
    }

    fn report_error(&mut self, error: &PluginError) {
        log::error!("[iconify-css] {error}");
        self.errors.push(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn rule(entries: &[(&str, &str)]) -> CssRule {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flatten_nested_palette() {
        let config = Config::from_str(
            r##"
[colors]
red = "#f00"
blue = { DEFAULT = "#00f", 500 = "#3b82f6", dark = { DEFAULT = "#003", 900 = "#001" } }
"##,
        )
        .expect("Should parse");

        let palette = Palette::from_colors(&config.colors);
        let flat: Vec<(&str, &str)> = palette
            .colors
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("red", "#f00"),
                ("blue", "#00f"),
                ("blue-500", "#3b82f6"),
                ("blue-dark", "#003"),
                ("blue-dark-900", "#001"),
            ]
        );
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.colors["current"], "currentColor");
    }

    #[test]
    fn test_escape_class_name() {
        assert_eq!(escape_class_name("i-mdi-home"), "i-mdi-home");
        assert_eq!(escape_class_name("i-set-left+top"), "i-set-left\\+top");
        assert_eq!(escape_class_name("2xl"), "\\2xl");
        assert_eq!(escape_class_name("a.b"), "a\\.b");
    }

    #[test]
    fn test_static_components_render() {
        let mut sheet = Stylesheet::default();
        let mut components = Components::new();
        components.insert(
            ".i-set-home".to_string(),
            rule(&[("width", "1em"), ("height", "1em")]),
        );
        sheet.add_components(components);

        assert_eq!(
            sheet.to_css(),
            ".i-set-home {\n  width: 1em;\n  height: 1em;\n}\n"
        );
    }

    #[test]
    fn test_color_components_expand_per_palette_color() {
        let mut colors = IndexMap::new();
        colors.insert("red".to_string(), ColorValue::Color("#f00".to_string()));
        colors.insert("blue".to_string(), ColorValue::Color("#00f".to_string()));
        let mut sheet = Stylesheet::new(Palette::from_colors(&colors));

        let mut components = BackgroundComponents::new();
        components.insert(
            "bg-set-arrow".to_string(),
            Box::new(|color: &str| rule(&[("color", color)])),
        );
        sheet.match_components(components);

        assert_eq!(sheet.rule_count(), 2);
        assert_eq!(
            sheet.to_css(),
            ".bg-set-arrow-red {\n  color: #f00;\n}\n\n.bg-set-arrow-blue {\n  color: #00f;\n}\n"
        );
    }

    #[test]
    fn test_errors_are_recorded() {
        let mut sheet = Stylesheet::default();
        sheet.report_error(&PluginError::icon_not_found("home", Some("mdi")));
        assert!(sheet.has_errors());
        assert_eq!(sheet.errors().len(), 1);
        assert!(sheet.errors()[0].contains("home"));
        assert_eq!(sheet.to_css(), "");
    }
}
