//! Plugin entry point: resolve every icon set, emit CSS, hand it to the host
//!
//! Errors anywhere in the pipeline are reported once through
//! [`PluginApi::report_error`] and nothing is registered: either every rule is
//! applied or none is.

use indexmap::IndexMap;

use crate::config::{IconOptions, IconSetOptionsRecord};
use crate::css::{emit, ColorFunction, CssRule, IconCss};
use crate::error::PluginError;
use crate::iconify::{load_icon, IconifyJson, LoadedIcon};
use crate::resolver::{IconSetResolver, ResolvedIconSet};

/// Static rules keyed by class selector (`.i-set-icon`)
pub type Components = IndexMap<String, CssRule>;

/// Color functions keyed by utility name (`bg-set-icon`)
pub type BackgroundComponents = IndexMap<String, ColorFunction>;

/// Host build tool receiving the generated CSS
pub trait PluginApi {
    fn add_components(&mut self, components: Components);

    /// Register utilities whose rule depends on a color value
    fn match_components(&mut self, components: BackgroundComponents);

    /// Diagnostic channel for a failed invocation
    fn report_error(&mut self, error: &PluginError) {
        log::error!("[iconify-css] {error}");
    }
}

/// CSS produced by one invocation
#[derive(Default)]
pub struct GeneratedCss {
    pub components: Components,
    pub background_components: BackgroundComponents,
}

impl GeneratedCss {
    fn add_icon(
        &mut self,
        set: &ResolvedIconSet<'_>,
        icon_name: &str,
        icon_options: &IconOptions,
    ) -> Result<LoadedIcon, PluginError> {
        let icon = load_icon(&set.document, icon_name)?;
        let scale = icon_options
            .scale
            .unwrap_or_else(|| set.options.scale.for_icon(icon_name));
        let prefix = &set.options.prefix;

        let icon_key = format!("{}-{}", set.name, icon.normalized_name);
        match emit(icon.clone(), &icon_options.css, scale) {
            IconCss::Static(rule) => {
                self.components.insert(format!(".{}{icon_key}", prefix.mask), rule);
            }
            IconCss::Dynamic(color_fn) => {
                self.background_components
                    .insert(format!("{}{icon_key}", prefix.background), color_fn);
            }
        }

        Ok(icon)
    }

    fn add_icon_set(&mut self, set: &ResolvedIconSet<'_>) -> Result<(), PluginError> {
        if set.options.include_all {
            let defaults = IconOptions::default();
            for icon_name in all_icon_names(&set.document) {
                self.add_icon(set, &icon_name, &defaults)?;
            }
        }

        for (icon_name, icon_options) in &set.options.icons {
            let icon = self.add_icon(set, icon_name, icon_options)?;
            log::debug!(
                "added {} icon {}-{}",
                icon.mode.as_str(),
                set.name,
                icon.normalized_name
            );
        }

        Ok(())
    }
}

fn all_icon_names(document: &IconifyJson) -> Vec<String> {
    document
        .icons
        .keys()
        .chain(document.aliases.keys())
        .cloned()
        .collect()
}

/// Runs the icon pipeline for one configuration
pub struct Icons<'a> {
    resolver: IconSetResolver<'a>,
}

impl<'a> Icons<'a> {
    pub fn new(resolver: IconSetResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Resolve every icon set and build the CSS, failing on the first error
    pub fn generate(&mut self, record: &IconSetOptionsRecord) -> Result<GeneratedCss, PluginError> {
        let sets = self.resolver.resolve_all(record)?;

        let mut generated = GeneratedCss::default();
        for set in &sets {
            generated.add_icon_set(set)?;
        }
        Ok(generated)
    }

    /// Generate and register the CSS with `api`.
    ///
    /// On failure the error is reported and nothing is registered. Returns
    /// whether the CSS was applied.
    pub fn apply(&mut self, record: &IconSetOptionsRecord, api: &mut dyn PluginApi) -> bool {
        match self.generate(record) {
            Ok(generated) => {
                api.add_components(generated.components);
                api.match_components(generated.background_components);
                true
            }
            Err(e) => {
                api.report_error(&e);
                false
            }
        }
    }
}
