//! Iconify JSON documents and icon resolution
//!
//! An icon set is a single JSON document holding `icons` and `aliases` plus
//! set-wide default geometry. [`load_icon`] turns one requested name into a
//! [`LoadedIcon`] ready for CSS emission.

mod loader;
pub mod transform;
mod types;

pub use loader::{load_icon, IconMode, LoadedIcon};
pub use transform::{apply_transform, IconTransform, ViewBox};
pub use types::{IconifyAlias, IconifyIcon, IconifyInfo, IconifyJson, IconifyProps};
