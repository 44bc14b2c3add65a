//! Icon and icon-set name handling

use std::sync::LazyLock;

use regex::Regex;

use crate::iconify::IconMode;

static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid case boundary regex"));

static MODE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?(bg|mask)$").expect("valid mode suffix regex"));

static URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid uri regex"));

/// An icon name with its query suffix stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIconName {
    /// Kebab-cased name used for lookups and selectors
    pub normalized_name: String,
    /// Mode forced by a trailing `?bg` or `?mask`
    pub forced_mode: Option<IconMode>,
}

/// Insert a hyphen at every lowercase/uppercase boundary, then lowercase everything.
///
/// Idempotent: an already kebab-cased name comes back unchanged.
pub fn to_kebab_case(value: &str) -> String {
    CASE_BOUNDARY.replace_all(value, "$1-$2").to_lowercase()
}

/// Split a requested icon name into its normalized form and an optional forced mode
pub fn parse_icon_name(raw_name: &str) -> ParsedIconName {
    let forced_mode = MODE_SUFFIX
        .captures(raw_name)
        .and_then(|captures| match &captures[1] {
            "bg" => Some(IconMode::Bg),
            "mask" => Some(IconMode::Mask),
            _ => None,
        });

    let normalized_name = to_kebab_case(&MODE_SUFFIX.replace(raw_name, ""));

    ParsedIconName {
        normalized_name,
        forced_mode,
    }
}

/// Whether a location points at a remote `http(s)://` resource
pub fn is_uri(location: &str) -> bool {
    URI.is_match(location)
}
