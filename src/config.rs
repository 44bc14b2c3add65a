//! Icon set configuration
//!
//! The CLI reads this from TOML; library users can build it with the
//! `with_*` methods.
//!
//! ```toml
//! [icon_sets.heroicons]
//! scale = 1.5
//! location = "https://example.com/heroicons.json"
//!
//! [icon_sets.heroicons.icons]
//! plus-circle = {}
//! "arrowUp?bg" = { scale = 2, css = { color = "red" } }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::css::CssRule;
use crate::error::ConfigError;

/// Function deriving a scale from the requested icon name
pub type ScaleFactory = Arc<dyn Fn(&str) -> f64 + Send + Sync>;

/// Scale applied to icons of a set, converted to `em` sizes
#[derive(Clone)]
pub enum Scale {
    Fixed(f64),
    Factory(ScaleFactory),
}

impl Scale {
    pub fn factory(f: impl Fn(&str) -> f64 + Send + Sync + 'static) -> Self {
        Scale::Factory(Arc::new(f))
    }

    /// Scale for the raw requested icon name
    pub fn for_icon(&self, icon_name: &str) -> f64 {
        match self {
            Scale::Fixed(scale) => *scale,
            Scale::Factory(factory) => factory(icon_name),
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Fixed(1.0)
    }
}

impl fmt::Debug for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Fixed(scale) => f.debug_tuple("Fixed").field(scale).finish(),
            Scale::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for Scale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Scale::Fixed)
    }
}

/// Per-icon options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconOptions {
    /// Overrides the set scale for this icon
    #[serde(default)]
    pub scale: Option<f64>,
    /// Declarations merged over the generated rule
    #[serde(default)]
    pub css: CssRule,
}

impl IconOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_css(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.css.insert(property.into(), value.into());
        self
    }
}

/// Selector prefixes for generated classes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Prefix {
    /// Prefix of static classes
    pub mask: String,
    /// Prefix of color-matched utilities
    pub background: String,
}

impl Default for Prefix {
    fn default() -> Self {
        Self {
            mask: "i-".to_string(),
            background: "bg-".to_string(),
        }
    }
}

/// Options for one icon set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconSetOptions {
    /// Selected icons, keyed by requested name (optionally suffixed `?bg` / `?mask`)
    #[serde(default)]
    pub icons: IndexMap<String, IconOptions>,
    #[serde(default)]
    pub scale: Scale,
    /// URI, path or module specifier of the Iconify JSON source
    #[serde(default)]
    pub location: Option<String>,
    /// Emit every icon and alias of the set
    #[serde(default)]
    pub include_all: bool,
    #[serde(default)]
    pub prefix: Prefix,
}

impl IconSetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_icon(mut self, name: impl Into<String>, options: IconOptions) -> Self {
        self.icons.insert(name.into(), options);
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = prefix;
        self
    }
}

/// Icon sets keyed by their configured name
pub type IconSetOptionsRecord = IndexMap<String, IconSetOptions>;

/// A palette entry: a single color or a nested table of shades
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Color(String),
    Shades(IndexMap<String, ColorValue>),
}

/// Complete build configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory for cached remote icon sets
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Directory from which `node_modules` lookups start
    #[serde(default)]
    pub node_modules: Option<PathBuf>,
    /// Palette used to expand color-matched utilities
    #[serde(default)]
    pub colors: IndexMap<String, ColorValue>,
    #[serde(default)]
    pub icon_sets: IconSetOptionsRecord,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file; relative paths resolve against its directory
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Cache directory, defaulting to `.iconify-cache` next to the config
    pub fn cache_dir(&self) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.join(".iconify-cache"),
        }
    }

    /// Start directory for bundled-package lookups
    pub fn node_modules_root(&self) -> PathBuf {
        match &self.node_modules {
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_str(
            r##"
cache_dir = "cache"

[colors]
red = "#f00"
blue = { DEFAULT = "#00f", 500 = "#3b82f6" }

[icon_sets.heroicons]
scale = 1.5
location = "https://example.com/heroicons.json"
include_all = true
prefix = { mask = "icon-" }

[icon_sets.heroicons.icons]
plus-circle = {}
"arrowUp?bg" = { scale = 2, css = { color = "red" } }
"##,
        )
        .expect("Should parse");

        assert_eq!(config.cache_dir, Some(PathBuf::from("cache")));
        assert_eq!(config.colors["red"], ColorValue::Color("#f00".to_string()));
        assert!(matches!(config.colors["blue"], ColorValue::Shades(_)));

        let set = &config.icon_sets["heroicons"];
        assert_eq!(set.scale.for_icon("anything"), 1.5);
        assert!(set.include_all);
        assert_eq!(set.prefix.mask, "icon-");
        assert_eq!(set.prefix.background, "bg-");
        assert_eq!(set.icons.keys().collect::<Vec<_>>(), vec!["plus-circle", "arrowUp?bg"]);

        let arrow = &set.icons["arrowUp?bg"];
        assert_eq!(arrow.scale, Some(2.0));
        assert_eq!(arrow.css.get("color").map(String::as_str), Some("red"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_str("[icon_sets.mdi]").expect("Should parse");
        let set = &config.icon_sets["mdi"];
        assert_eq!(set.scale.for_icon("x"), 1.0);
        assert!(set.location.is_none());
        assert!(!set.include_all);
        assert!(set.icons.is_empty());
        assert_eq!(set.prefix, Prefix::default());
        assert_eq!(config.cache_dir(), PathBuf::from(".iconify-cache"));
    }

    #[test]
    fn test_scale_factory() {
        let scale = Scale::factory(|name| if name.ends_with("-sm") { 0.75 } else { 1.0 });
        assert_eq!(scale.for_icon("arrow-sm"), 0.75);
        assert_eq!(scale.for_icon("arrow"), 1.0);
    }

    #[test]
    fn test_builder() {
        let set = IconSetOptions::new()
            .with_location("./icons.json")
            .with_scale(Scale::Fixed(2.0))
            .with_include_all(true)
            .with_icon("home", IconOptions::new().with_scale(3.0).with_css("color", "red"));

        assert_eq!(set.location.as_deref(), Some("./icons.json"));
        assert_eq!(set.scale.for_icon("home"), 2.0);
        assert_eq!(set.icons["home"].scale, Some(3.0));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::from_str("[icon_sets.mdi]\nlocaton = \"x\"").is_err());
    }

    #[test]
    fn test_relative_paths_use_base_dir() {
        let mut config = Config::from_str("cache_dir = \"c\"\nnode_modules = \"web\"").unwrap();
        config.base_dir = PathBuf::from("/project");
        assert_eq!(config.cache_dir(), PathBuf::from("/project/c"));
        assert_eq!(config.node_modules_root(), PathBuf::from("/project/web"));
    }
}
