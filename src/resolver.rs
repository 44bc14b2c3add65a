//! Locating and loading the Iconify JSON document of every configured icon set
//!
//! Each icon set resolves through the first matching rule:
//!
//! 1. no `location`: the bundled packages `@iconify-json/<name>/icons.json`, then
//!    `@iconify/json/json/<name>.json`, looked up in `node_modules`
//! 2. `http(s)://` location: the cache, or a pending fetch on a miss
//! 3. anything else: a module specifier, falling back to a filesystem path
//!
//! Pending URIs are fetched in one batch after every set has been scanned.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::{cache_key, IconifyCache};
use crate::config::{IconSetOptions, IconSetOptionsRecord};
use crate::error::{FetchError, PluginError};
use crate::fetch::{FetchRequest, Fetcher};
use crate::iconify::IconifyJson;
use crate::name::{is_uri, to_kebab_case};

/// Resolves module specifiers against `node_modules` directories, walking up
/// from a root directory
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    root: PathBuf,
}

impl ModuleResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file `specifier` names inside the nearest `node_modules`
    pub fn resolve(&self, specifier: &str) -> Option<PathBuf> {
        if specifier.starts_with('.') || Path::new(specifier).is_absolute() {
            return None;
        }

        self.root
            .ancestors()
            .map(|dir| dir.join("node_modules").join(specifier))
            .find(|candidate| candidate.is_file())
    }
}

fn individual_package(name: &str) -> String {
    format!("@iconify-json/{name}/icons.json")
}

fn monolithic_package(name: &str) -> String {
    format!("@iconify/json/json/{name}.json")
}

/// Bundled package conventions, in priority order
const BUNDLED_PACKAGES: [fn(&str) -> String; 2] = [individual_package, monolithic_package];

/// An icon set with its loaded document
#[derive(Debug, Clone)]
pub struct ResolvedIconSet<'a> {
    /// Kebab-cased icon set name
    pub name: String,
    pub options: &'a IconSetOptions,
    pub document: IconifyJson,
}

/// Read and parse an Iconify JSON file
pub fn read_document(path: &Path) -> Result<IconifyJson, PluginError> {
    let content = fs::read_to_string(path).map_err(|source| PluginError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;

    IconifyJson::from_json(&content).map_err(|source| PluginError::ParseDocument {
        path: path.to_path_buf(),
        source,
    })
}

enum Located {
    Document(IconifyJson),
    Pending(String),
}

/// Drives location resolution for all icon sets of one invocation
pub struct IconSetResolver<'a> {
    modules: ModuleResolver,
    base_dir: PathBuf,
    cache: &'a mut dyn IconifyCache,
    fetcher: &'a dyn Fetcher,
}

impl<'a> IconSetResolver<'a> {
    pub fn new(
        modules: ModuleResolver,
        cache: &'a mut dyn IconifyCache,
        fetcher: &'a dyn Fetcher,
    ) -> Self {
        Self {
            base_dir: modules.root().to_path_buf(),
            modules,
            cache,
            fetcher,
        }
    }

    /// Directory plain filesystem locations are resolved against
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Load the document of every icon set, in configuration order.
    ///
    /// Any failure aborts the whole resolution.
    pub fn resolve_all<'r>(
        &mut self,
        record: &'r IconSetOptionsRecord,
    ) -> Result<Vec<ResolvedIconSet<'r>>, PluginError> {
        let mut located = Vec::with_capacity(record.len());
        let mut pending_uris: Vec<String> = Vec::new();

        for (icon_set, options) in record {
            let entry = self.locate(icon_set, options)?;
            if let Located::Pending(uri) = &entry {
                if !pending_uris.contains(uri) {
                    pending_uris.push(uri.clone());
                }
            }
            located.push((icon_set, options, entry));
        }

        if !pending_uris.is_empty() {
            self.fetch_pending(&pending_uris)?;
        }

        located
            .into_iter()
            .map(|(icon_set, options, entry)| -> Result<ResolvedIconSet<'r>, PluginError> {
                let document = match entry {
                    Located::Document(document) => document,
                    Located::Pending(uri) => self.read_cached(&uri)?,
                };

                Ok(ResolvedIconSet {
                    name: to_kebab_case(icon_set),
                    options,
                    document,
                })
            })
            .collect()
    }

    fn locate(&self, icon_set: &str, options: &IconSetOptions) -> Result<Located, PluginError> {
        let kebab_name = to_kebab_case(icon_set);

        let Some(location) = options.location.as_deref() else {
            let path = BUNDLED_PACKAGES
                .iter()
                .find_map(|package| self.modules.resolve(&package(&kebab_name)))
                .ok_or_else(|| PluginError::icon_set_not_found(icon_set, &kebab_name))?;

            log::debug!("icon set {icon_set} resolved to bundled package {}", path.display());
            return read_document(&path).map(Located::Document);
        };

        if is_uri(location) {
            if !self.cache.has(location) {
                log::debug!("icon set {icon_set} queued for fetch from {location}");
                return Ok(Located::Pending(location.to_string()));
            }

            log::debug!("icon set {icon_set} loaded from cache for {location}");
            return self.read_cached(location).map(Located::Document);
        }

        let path = self
            .modules
            .resolve(location)
            .unwrap_or_else(|| self.base_dir.join(location));

        if !path.exists() {
            return Err(PluginError::location_not_found(icon_set, location));
        }

        log::debug!("icon set {icon_set} resolved to {}", path.display());
        read_document(&path).map(Located::Document)
    }

    fn fetch_pending(&mut self, uris: &[String]) -> Result<(), PluginError> {
        let cache_dir = self
            .cache
            .directory()
            .ok_or(FetchError::NoCacheDirectory)?
            .to_path_buf();

        let request = FetchRequest {
            cache_dir,
            uris: uris.to_vec(),
        };
        let fetched = self.fetcher.fetch(&request);

        // A failed batch may still have written some entries
        let mut missing = None;
        for uri in uris {
            if !self.cache.adopt(uri) && missing.is_none() {
                missing = Some(uri.clone());
            }
        }

        fetched?;
        match missing {
            Some(uri) => Err(FetchError::NotPopulated { uri }.into()),
            None => Ok(()),
        }
    }

    /// Document for a URI known to be in the cache
    fn read_cached(&self, uri: &str) -> Result<IconifyJson, PluginError> {
        if let Some(document) = self.cache.get(uri) {
            return Ok(document);
        }

        match self.cache.directory() {
            Some(dir) => read_document(&dir.join(cache_key(uri))),
            None => Err(FetchError::NotPopulated {
                uri: uri.to_string(),
            }
            .into()),
        }
    }
}
