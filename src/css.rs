//! CSS rule generation for loaded icons

use indexmap::IndexMap;

use crate::iconify::{IconMode, LoadedIcon};
use crate::svg::icon_to_data_url;

/// Ordered CSS declarations, property name to value
pub type CssRule = IndexMap<String, String>;

/// Produces a rule for a runtime color value
pub type ColorFunction = Box<dyn Fn(&str) -> CssRule + Send + Sync>;

/// Custom property holding the icon's data URI
pub const URL_VAR_NAME: &str = "--iconify-css-url";

/// CSS emitted for one icon
pub enum IconCss {
    /// Mask or fixed-background rule
    Static(CssRule),
    /// Background rule recolored per call
    Dynamic(ColorFunction),
}

/// `width`/`height` in `em`, preserving the icon's aspect ratio
pub fn icon_dimensions(icon: &LoadedIcon, scale: f64) -> (String, String) {
    (
        format!("{}em", icon.width / icon.height * scale),
        format!("{}em", scale),
    )
}

fn insert(rule: &mut CssRule, property: &str, value: impl Into<String>) {
    rule.insert(property.to_string(), value.into());
}

fn finish(mut rule: CssRule, icon: &LoadedIcon, defaults: &CssRule, scale: f64) -> CssRule {
    let (width, height) = icon_dimensions(icon, scale);
    insert(&mut rule, "width", width);
    insert(&mut rule, "height", height);

    for (property, value) in defaults {
        rule.insert(property.clone(), value.clone());
    }
    rule
}

fn background_rule(url: String, icon: &LoadedIcon, defaults: &CssRule, scale: f64) -> CssRule {
    let mut rule = CssRule::new();
    insert(&mut rule, URL_VAR_NAME, url);
    insert(&mut rule, "background", format!("var({URL_VAR_NAME}) no-repeat"));
    insert(&mut rule, "background-size", "100% 100%");
    insert(&mut rule, "background-color", "transparent");
    finish(rule, icon, defaults, scale)
}

/// Static rule for `icon`: a `currentColor` mask in mask mode, otherwise a
/// background image. Declarations in `defaults` override generated ones.
pub fn icon_css(icon: &LoadedIcon, defaults: &CssRule, scale: f64) -> CssRule {
    let url = icon_to_data_url(icon.view_box(), &icon.body);

    if icon.mode != IconMode::Mask {
        return background_rule(url, icon, defaults, scale);
    }

    let source = format!("var({URL_VAR_NAME}) no-repeat");
    let mut rule = CssRule::new();
    insert(&mut rule, URL_VAR_NAME, url);
    insert(&mut rule, "mask", source.clone());
    insert(&mut rule, "-webkit-mask", source);
    insert(&mut rule, "mask-size", "100% 100%");
    insert(&mut rule, "-webkit-mask-size", "100% 100%");
    insert(&mut rule, "background-color", "currentColor");
    finish(rule, icon, defaults, scale)
}

/// Background rule generator substituting `currentColor` in the body with the given color
pub fn icon_css_color_fn(icon: LoadedIcon, defaults: CssRule, scale: f64) -> ColorFunction {
    Box::new(move |color| {
        let body = icon.body.replace("currentColor", color);
        let url = icon_to_data_url(icon.view_box(), &body);
        background_rule(url, &icon, &defaults, scale)
    })
}

/// Emit the CSS for `icon` according to its mode
pub fn emit(icon: LoadedIcon, defaults: &CssRule, scale: f64) -> IconCss {
    match icon.mode {
        IconMode::Bg => IconCss::Dynamic(icon_css_color_fn(icon, defaults.clone(), scale)),
        IconMode::Mask | IconMode::Color => IconCss::Static(icon_css(&icon, defaults, scale)),
    }
}
