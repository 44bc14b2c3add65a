//! Error types for icon resolution, fetching and configuration

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that abort a whole plugin invocation
#[derive(Debug, Error)]
pub enum PluginError {
    /// No location given and no bundled package provides the set
    #[error(
        "icon set \"{icon_set}\" not found. Please see if the name is correct or try installing it with \"{install_hint}\""
    )]
    IconSetNotFound {
        icon_set: String,
        install_hint: String,
    },

    /// Explicit location resolves to neither a module nor an existing path
    #[error("failed to find icon set \"{icon_set}\" at location \"{location}\"")]
    LocationNotFound { icon_set: String, location: String },

    /// Icon or alias absent from a loaded document
    #[error("icon \"{icon}\" not found{}", in_icon_set(.icon_set))]
    IconNotFound {
        icon: String,
        icon_set: Option<String>,
    },

    /// Alias whose parent is missing from `icons`
    #[error("alias \"{alias}\" points at missing icon \"{parent}\"")]
    AliasParentNotFound { alias: String, parent: String },

    /// Remote icon sets could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Icon set document could not be read
    #[error("failed to read icon set {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Icon set document is not valid Iconify JSON
    #[error("failed to parse icon set {path}: {source}")]
    ParseDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl PluginError {
    /// Create an icon set not found error with an install suggestion
    pub fn icon_set_not_found(icon_set: impl Into<String>, kebab_name: &str) -> Self {
        Self::IconSetNotFound {
            icon_set: icon_set.into(),
            install_hint: format!("npm install @iconify-json/{kebab_name}"),
        }
    }

    pub fn location_not_found(icon_set: impl Into<String>, location: impl Into<String>) -> Self {
        Self::LocationNotFound {
            icon_set: icon_set.into(),
            location: location.into(),
        }
    }

    pub fn icon_not_found(icon: impl Into<String>, icon_set: Option<&str>) -> Self {
        Self::IconNotFound {
            icon: icon.into(),
            icon_set: icon_set.map(str::to_string),
        }
    }

    pub fn alias_parent_not_found(alias: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::AliasParentNotFound {
            alias: alias.into(),
            parent: parent.into(),
        }
    }
}

fn in_icon_set(icon_set: &Option<String>) -> String {
    icon_set
        .as_deref()
        .map(|name| format!(" in \"{name}\""))
        .unwrap_or_default()
}

/// Errors from the out-of-process fetch of remote icon sets
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to spawn fetch helper: {0}")]
    Spawn(#[source] std::io::Error),

    /// Helper exited unsuccessfully; its stderr carries the diagnostic
    #[error("fetch helper exited with {status}: {stderr}")]
    ProcessFailed { status: ExitStatus, stderr: String },

    /// Helper reported success but left a URI out of the cache
    #[error("fetched icon set \"{uri}\" is missing from the cache")]
    NotPopulated { uri: String },

    #[error("cache has no backing directory for the fetch helper to write to")]
    NoCacheDirectory,

    #[error("request to \"{uri}\" failed: {message}")]
    Http { uri: String, message: String },

    #[error("failed to write cache entry: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the on-disk cache itself; missing keys are never errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize cache entry: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}
