//! SVG data-URI encoding
//!
//! Icons are embedded in CSS as `url("data:image/svg+xml,...")`. Only the
//! characters that break a CSS string or a URL are escaped; double quotes are
//! swapped for apostrophes, which keeps the payload far smaller than base64.

use std::sync::LazyLock;

use regex::Regex;

use crate::iconify::ViewBox;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Escape an `<svg>` document for use inside a data URI
pub fn encode_svg(svg: &str) -> String {
    let mut svg = svg.to_string();

    if !svg.contains(" xmlns:xlink=") && svg.contains(" xlink:") {
        svg = svg.replacen(
            "<svg",
            &format!(r#"<svg xmlns:xlink="{XLINK_NAMESPACE}""#),
            1,
        );
    }

    if !svg.contains(" xmlns=") {
        svg = svg.replacen("<svg", &format!(r#"<svg xmlns="{SVG_NAMESPACE}""#), 1);
    }

    let escaped = svg
        .replace('"', "'")
        .replace('%', "%25")
        .replace('#', "%23")
        .replace('{', "%7B")
        .replace('}', "%7D")
        .replace('<', "%3C")
        .replace('>', "%3E");

    WHITESPACE.replace_all(&escaped, " ").into_owned()
}

/// Wrap `body` in an `<svg>` root for `view_box` and return the CSS `url(...)` value
pub fn icon_to_data_url(view_box: ViewBox, body: &str) -> String {
    let svg = format!(
        r#"<svg viewBox="{} {} {} {}">{}</svg>"#,
        view_box.left, view_box.top, view_box.width, view_box.height, body
    );
    format!(r#"url("data:image/svg+xml,{}")"#, encode_svg(&svg))
}

/// Options for [`icon_url`]
#[derive(Debug, Clone, PartialEq)]
pub struct IconUrlOptions {
    /// Left of the viewBox, default 0
    pub left: Option<f64>,
    /// Top of the viewBox, default 0
    pub top: Option<f64>,
    pub width: f64,
    pub height: f64,
    pub body: String,
}

/// Build a data-URI `url(...)` for an arbitrary icon body
pub fn icon_url(options: &IconUrlOptions) -> String {
    let view_box = ViewBox::new(
        options.left.unwrap_or(0.0),
        options.top.unwrap_or(0.0),
        options.width,
        options.height,
    );
    icon_to_data_url(view_box, &options.body)
}
