//! Icon lookup inside a loaded Iconify document

use crate::error::PluginError;
use crate::name::parse_icon_name;

use super::transform::{apply_transform, IconTransform, ViewBox};
use super::types::{IconifyJson, IconifyProps};

const DEFAULT_LEFT: f64 = 0.0;
const DEFAULT_TOP: f64 = 0.0;
const DEFAULT_WIDTH: f64 = 16.0;
const DEFAULT_HEIGHT: f64 = 16.0;

/// How an icon is rendered in CSS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconMode {
    /// Shape clips a `currentColor` fill
    Mask,
    /// Static background image showing the icon's own colors
    Color,
    /// Background image recolored per utility, registered as a color function
    Bg,
}

impl IconMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconMode::Mask => "mask",
            IconMode::Color => "color",
            IconMode::Bg => "bg",
        }
    }
}

/// A render-ready icon with transforms already applied to its body
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedIcon {
    pub normalized_name: String,
    pub body: String,
    pub mode: IconMode,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl LoadedIcon {
    pub fn view_box(&self) -> ViewBox {
        ViewBox::new(self.left, self.top, self.width, self.height)
    }
}

/// Resolve `icon_name` (optionally suffixed with `?bg` / `?mask`) against `doc`.
///
/// Aliases are shallow-merged over their parent. Geometry falls back from the
/// icon to the set defaults to `0 0 16 16`.
pub fn load_icon(doc: &IconifyJson, icon_name: &str) -> Result<LoadedIcon, PluginError> {
    let parsed = parse_icon_name(icon_name);
    let name = parsed.normalized_name;

    let (body, props) = if let Some(icon) = doc.icons.get(&name) {
        (icon.body.as_str(), icon.props)
    } else if let Some(alias) = doc.aliases.get(&name) {
        let parent = doc
            .icons
            .get(&alias.parent)
            .ok_or_else(|| PluginError::alias_parent_not_found(&name, &alias.parent))?;
        (parent.body.as_str(), parent.props.merged_with(alias.props))
    } else {
        return Err(PluginError::icon_not_found(&name, doc.display_name()));
    };

    let set_defaults = IconifyProps {
        left: doc.left,
        top: doc.top,
        width: doc.width,
        height: doc.height,
        ..Default::default()
    };
    let props = set_defaults.merged_with(props);

    let view_box = ViewBox::new(
        props.left.unwrap_or(DEFAULT_LEFT),
        props.top.unwrap_or(DEFAULT_TOP),
        props.width.unwrap_or(DEFAULT_WIDTH),
        props.height.unwrap_or(DEFAULT_HEIGHT),
    );

    let mode = parsed.forced_mode.unwrap_or(if body.contains("currentColor") {
        IconMode::Mask
    } else {
        IconMode::Color
    });

    let transform = IconTransform {
        rotate: props.rotate.unwrap_or(0),
        h_flip: props.h_flip.unwrap_or(false),
        v_flip: props.v_flip.unwrap_or(false),
    };

    Ok(LoadedIcon {
        normalized_name: name,
        body: apply_transform(body, view_box, transform),
        mode,
        left: view_box.left,
        top: view_box.top,
        width: view_box.width,
        height: view_box.height,
    })
}
