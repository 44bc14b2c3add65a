//! Serde model of the Iconify JSON format

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One icon set in Iconify JSON format
///
/// Set-level `left`/`top`/`width`/`height` apply to every icon or alias
/// lacking its own value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconifyJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<IconifyInfo>,
    #[serde(default)]
    pub icons: IndexMap<String, IconifyIcon>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, IconifyAlias>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Human-readable metadata about an icon set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconifyInfo {
    pub name: String,
}

/// Geometry and transform fields shared by icons and aliases
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconifyProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Number of quarter turns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_flip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_flip: Option<bool>,
}

impl IconifyProps {
    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn merged_with(self, other: IconifyProps) -> IconifyProps {
        IconifyProps {
            left: other.left.or(self.left),
            top: other.top.or(self.top),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            rotate: other.rotate.or(self.rotate),
            h_flip: other.h_flip.or(self.h_flip),
            v_flip: other.v_flip.or(self.v_flip),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconifyIcon {
    pub body: String,
    #[serde(flatten)]
    pub props: IconifyProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconifyAlias {
    pub parent: String,
    #[serde(flatten)]
    pub props: IconifyProps,
}

impl IconifyJson {
    /// Parse a document from its JSON text
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Display name of the set, if the document carries one
    pub fn display_name(&self) -> Option<&str> {
        self.info.as_ref().map(|info| info.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let doc = IconifyJson::from_json(
            r#"{
                "prefix": "test",
                "info": { "name": "Test Icons" },
                "icons": {
                    "a": { "body": "<path/>", "width": 20, "hFlip": true }
                },
                "aliases": {
                    "b": { "parent": "a", "rotate": 1 }
                },
                "width": 24,
                "height": 24
            }"#,
        )
        .expect("Should parse");

        assert_eq!(doc.display_name(), Some("Test Icons"));
        assert_eq!(doc.width, Some(24.0));
        let icon = &doc.icons["a"];
        assert_eq!(icon.props.width, Some(20.0));
        assert_eq!(icon.props.h_flip, Some(true));
        assert_eq!(doc.aliases["b"].props.rotate, Some(1));
    }

    #[test]
    fn test_missing_aliases_default_to_empty() {
        let doc = IconifyJson::from_json(r#"{ "icons": {} }"#).expect("Should parse");
        assert!(doc.aliases.is_empty());
        assert_eq!(doc.display_name(), None);
    }

    #[test]
    fn test_merged_with_prefers_override() {
        let base = IconifyProps {
            width: Some(10.0),
            height: Some(12.0),
            ..Default::default()
        };
        let over = IconifyProps {
            width: Some(30.0),
            rotate: Some(2),
            ..Default::default()
        };
        let merged = base.merged_with(over);
        assert_eq!(merged.width, Some(30.0));
        assert_eq!(merged.height, Some(12.0));
        assert_eq!(merged.rotate, Some(2));
    }
}
