//! iconify-css - CSS icon classes generated from Iconify JSON icon sets
//!
//! Icon sets are resolved from bundled npm packages, local files or remote
//! URIs (cached on disk), and every selected icon becomes a CSS rule embedding
//! the icon as an SVG data URI. Monochrome icons become `currentColor` masks,
//! colored icons become background images, and icons requested with `?bg`
//! become color-matched utilities expanded over a palette.
//!
//! # Example
//!
//! ```rust,no_run
//! use iconify_css::{build_stylesheet, Config};
//!
//! let config = Config::from_str(r#"
//! [icon_sets.mdi.icons]
//! home = {}
//! "#).unwrap();
//!
//! let stylesheet = build_stylesheet(&config);
//! assert!(!stylesheet.has_errors());
//! println!("{}", stylesheet.to_css());
//! ```

pub mod cache;
pub mod config;
pub mod css;
pub mod error;
pub mod fetch;
pub mod iconify;
pub mod name;
pub mod plugin;
pub mod resolver;
pub mod stylesheet;
pub mod svg;

pub use cache::{cache_key, FileCache, IconifyCache, MemoryCache};
pub use config::{Config, IconOptions, IconSetOptions, IconSetOptionsRecord, Prefix, Scale};
pub use css::{CssRule, IconCss};
pub use error::{CacheError, ConfigError, FetchError, PluginError};
pub use fetch::{fetch_all, FetchRequest, Fetcher, ProcessFetcher};
pub use iconify::{load_icon, IconMode, IconifyJson, LoadedIcon};
pub use plugin::{Icons, PluginApi};
pub use resolver::{IconSetResolver, ModuleResolver};
pub use stylesheet::{Palette, Stylesheet};

/// Build the stylesheet for `config`, fetching remote sets with this executable's
/// `fetch` subcommand
///
/// Failures are reported on the returned stylesheet, which then holds no rules.
pub fn build_stylesheet(config: &Config) -> Stylesheet {
    let mut stylesheet = new_stylesheet(config);
    match ProcessFetcher::current_exe() {
        Ok(fetcher) => apply(config, &fetcher, &mut stylesheet),
        Err(e) => stylesheet.report_error(&e.into()),
    }
    stylesheet
}

/// Build the stylesheet for `config` with a custom fetcher
pub fn build_stylesheet_with(config: &Config, fetcher: &dyn Fetcher) -> Stylesheet {
    let mut stylesheet = new_stylesheet(config);
    apply(config, fetcher, &mut stylesheet);
    stylesheet
}

fn new_stylesheet(config: &Config) -> Stylesheet {
    if config.colors.is_empty() {
        Stylesheet::default()
    } else {
        Stylesheet::new(Palette::from_colors(&config.colors))
    }
}

/// Run the plugin for `config` against any host
pub fn apply(config: &Config, fetcher: &dyn Fetcher, api: &mut dyn PluginApi) {
    let mut cache = match FileCache::new(config.cache_dir()) {
        Ok(cache) => cache,
        Err(e) => {
            api.report_error(&e.into());
            return;
        }
    };

    let modules = ModuleResolver::new(config.node_modules_root());
    let resolver =
        IconSetResolver::new(modules, &mut cache, fetcher).with_base_dir(&config.base_dir);
    Icons::new(resolver).apply(&config.icon_sets, api);
}
