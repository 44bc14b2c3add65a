//! Persistent cache of remote Iconify JSON documents
//!
//! Each source URI maps to one file in a flat directory. The file name is the
//! lowercase hex SHA-256 of the URI ([`cache_key`]), so the fetch helper and the
//! cache agree on where an entry lives without sharing any state.
//!
//! Iteration walks the directory listing, not insertion order.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::CacheError;
use crate::iconify::IconifyJson;

/// File name used for the cache entry of `uri`
pub fn cache_key(uri: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(uri.as_bytes());
    hex::encode(hasher.finalize())
}

/// Storage for fetched icon set documents, keyed by source URI
pub trait IconifyCache {
    /// Cached document for `uri`, if any. A missing entry is not an error.
    fn get(&self, uri: &str) -> Option<IconifyJson>;

    /// Store `doc` for `uri` unless an entry already exists (first write wins)
    fn set(&mut self, uri: &str, doc: &IconifyJson) -> Result<(), CacheError>;

    fn has(&self, uri: &str) -> bool;

    /// Remove the entry for `uri`, returning whether one existed
    fn delete(&mut self, uri: &str) -> Result<bool, CacheError>;

    fn clear(&mut self) -> Result<(), CacheError>;

    /// Number of entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All `(key, document)` pairs
    fn entries(&self) -> Vec<(String, IconifyJson)>;

    /// Directory an out-of-process writer can populate, if the cache has one
    fn directory(&self) -> Option<&Path> {
        None
    }

    /// Account for an entry written by an out-of-process writer.
    ///
    /// Only call this for a URI that was absent before the external write.
    /// Returns whether the entry is now present.
    fn adopt(&mut self, uri: &str) -> bool {
        self.has(uri)
    }
}

/// Directory-backed cache, one JSON file per URI
#[derive(Debug)]
pub struct FileCache {
    cache_dir: PathBuf,
    size: usize,
}

impl FileCache {
    /// Open the cache at `cache_dir`, creating the directory if absent
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let cache_dir = cache_dir.into();

        let size = if cache_dir.exists() {
            fs::read_dir(&cache_dir)?.count()
        } else {
            fs::create_dir_all(&cache_dir)?;
            0
        };

        log::debug!("opened icon cache {} with {size} entries", cache_dir.display());

        Ok(Self { cache_dir, size })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn entry_path(&self, uri: &str) -> PathBuf {
        self.cache_dir.join(cache_key(uri))
    }

    fn read_entry(path: &Path) -> Option<IconifyJson> {
        let content = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(doc) => Some(doc),
            Err(e) => {
                log::warn!("ignoring unreadable cache entry {}: {e}", path.display());
                None
            }
        }
    }

    fn listing(&self) -> Vec<PathBuf> {
        fs::read_dir(&self.cache_dir)
            .into_iter()
            .flatten()
            .flatten()
            .map(|entry| entry.path())
            .collect()
    }

    /// Cache keys (file names) in directory order
    pub fn keys(&self) -> Vec<String> {
        self.listing()
            .iter()
            .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
            .collect()
    }

    /// Cached documents in directory order
    pub fn values(&self) -> Vec<IconifyJson> {
        self.listing()
            .iter()
            .filter_map(|path| Self::read_entry(path))
            .collect()
    }
}

impl IconifyCache for FileCache {
    fn get(&self, uri: &str) -> Option<IconifyJson> {
        let path = self.entry_path(uri);
        if !path.exists() {
            return None;
        }
        Self::read_entry(&path)
    }

    fn set(&mut self, uri: &str, doc: &IconifyJson) -> Result<(), CacheError> {
        let path = self.entry_path(uri);
        if path.exists() {
            return Ok(());
        }

        fs::write(&path, serde_json::to_string(doc)?)?;
        self.size += 1;
        Ok(())
    }

    fn has(&self, uri: &str) -> bool {
        self.entry_path(uri).exists()
    }

    fn delete(&mut self, uri: &str) -> Result<bool, CacheError> {
        let path = self.entry_path(uri);
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)?;
        self.size = self.size.saturating_sub(1);
        Ok(true)
    }

    fn clear(&mut self) -> Result<(), CacheError> {
        for path in self.listing() {
            fs::remove_file(&path)?;
        }
        self.size = 0;
        Ok(())
    }

    fn len(&self) -> usize {
        self.size
    }

    fn entries(&self) -> Vec<(String, IconifyJson)> {
        self.listing()
            .iter()
            .filter_map(|path| {
                let key = path.file_name()?.to_str()?.to_string();
                Some((key, Self::read_entry(path)?))
            })
            .collect()
    }

    fn directory(&self) -> Option<&Path> {
        Some(&self.cache_dir)
    }

    fn adopt(&mut self, uri: &str) -> bool {
        if self.has(uri) {
            self.size += 1;
            true
        } else {
            false
        }
    }
}

/// In-memory cache, mainly for tests and embedders without a cache directory
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, IconifyJson>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IconifyCache for MemoryCache {
    fn get(&self, uri: &str) -> Option<IconifyJson> {
        self.entries.get(&cache_key(uri)).cloned()
    }

    fn set(&mut self, uri: &str, doc: &IconifyJson) -> Result<(), CacheError> {
        self.entries
            .entry(cache_key(uri))
            .or_insert_with(|| doc.clone());
        Ok(())
    }

    fn has(&self, uri: &str) -> bool {
        self.entries.contains_key(&cache_key(uri))
    }

    fn delete(&mut self, uri: &str) -> Result<bool, CacheError> {
        Ok(self.entries.remove(&cache_key(uri)).is_some())
    }

    fn clear(&mut self) -> Result<(), CacheError> {
        self.entries.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Vec<(String, IconifyJson)> {
        self.entries
            .iter()
            .map(|(key, doc)| (key.clone(), doc.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iconify::IconifyIcon;
    use pretty_assertions::assert_eq;

    fn doc(name: &str) -> IconifyJson {
        let mut doc = IconifyJson {
            prefix: Some(name.to_string()),
            width: Some(24.0),
            height: Some(24.0),
            ..Default::default()
        };
        doc.icons.insert(
            name.to_string(),
            IconifyIcon {
                body: format!("<path id=\"{name}\"/>"),
                ..Default::default()
            },
        );
        doc
    }

    fn file_cache() -> (tempfile::TempDir, FileCache) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cache = FileCache::new(dir.path().join("cache")).expect("cache");
        cache.set("cache1.json", &doc("one")).unwrap();
        cache.set("cache2.json", &doc("two")).unwrap();
        assert_eq!(cache.len(), 2);
        (dir, cache)
    }

    fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
        items.sort();
        items
    }

    #[test]
    fn test_cache_key_is_sha256_hex() {
        assert_eq!(
            cache_key("https://example.com"),
            "100680ad546ce6a577f42f52df33b4cfdca756859e664b8d7de329b150d09ce9"
        );
        assert_eq!(cache_key("a").len(), 64);
        assert_ne!(cache_key("a"), cache_key("b"));
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache");
        let cache = FileCache::new(&path).unwrap();
        assert!(path.is_dir());
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reopen_counts_existing_entries() {
        let (dir, _cache) = file_cache();
        let reopened = FileCache::new(dir.path().join("cache")).unwrap();
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn test_get() {
        let (_dir, cache) = file_cache();
        assert_eq!(cache.get("cache1.json"), Some(doc("one")));
        assert_eq!(cache.get("cache2.json"), Some(doc("two")));
        assert_eq!(cache.get("undefined"), None);
    }

    #[test]
    fn test_has() {
        let (_dir, cache) = file_cache();
        assert!(cache.has("cache1.json"));
        assert!(cache.has("cache2.json"));
        assert!(!cache.has("undefined"));
    }

    #[test]
    fn test_set_is_first_write_wins() {
        let (_dir, mut cache) = file_cache();
        cache.set("cache1.json", &doc("other")).unwrap();
        assert_eq!(cache.get("cache1.json"), Some(doc("one")));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_keys_values_entries() {
        let (_dir, cache) = file_cache();
        let expected_keys = sorted(vec![cache_key("cache1.json"), cache_key("cache2.json")]);

        assert_eq!(sorted(cache.keys()), expected_keys);
        assert_eq!(cache.values().len(), 2);

        let entries = cache.entries();
        assert_eq!(sorted(entries.iter().map(|(k, _)| k.clone()).collect()), expected_keys);
        for (key, value) in entries {
            let expected = if key == cache_key("cache1.json") {
                doc("one")
            } else {
                doc("two")
            };
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_delete_one() {
        let (_dir, mut cache) = file_cache();
        assert!(cache.delete("cache1.json").unwrap());
        assert_eq!(cache.len(), 1);
        assert!(!cache.has("cache1.json"));
        assert_eq!(cache.keys(), vec![cache_key("cache2.json")]);
    }

    #[test]
    fn test_delete_both() {
        let (_dir, mut cache) = file_cache();
        assert!(cache.delete("cache1.json").unwrap());
        assert!(cache.delete("cache2.json").unwrap());
        assert_eq!(cache.len(), 0);
        assert!(cache.entries().is_empty());
    }

    #[test]
    fn test_delete_missing() {
        let (_dir, mut cache) = file_cache();
        assert!(!cache.delete("undefined").unwrap());
        assert_eq!(cache.len(), 2);
        assert!(cache.has("cache1.json"));
        assert!(cache.has("cache2.json"));
    }

    #[test]
    fn test_clear() {
        let (_dir, mut cache) = file_cache();
        cache.clear().unwrap();
        assert_eq!(cache.len(), 0);
        assert!(cache.entries().is_empty());
        assert!(cache.keys().is_empty());
    }

    #[test]
    fn test_adopt_external_write() {
        let (_dir, mut cache) = file_cache();
        let uri = "https://example.com/icons.json";
        assert!(!cache.adopt(uri));
        assert_eq!(cache.len(), 2);

        fs::write(
            cache.cache_dir().join(cache_key(uri)),
            serde_json::to_string(&doc("three")).unwrap(),
        )
        .unwrap();

        assert!(cache.adopt(uri));
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(uri), Some(doc("three")));
    }

    #[test]
    fn test_memory_cache_matches_file_semantics() {
        let mut cache = MemoryCache::new();
        cache.set("a", &doc("one")).unwrap();
        cache.set("a", &doc("two")).unwrap();
        assert_eq!(cache.get("a"), Some(doc("one")));
        assert_eq!(cache.len(), 1);
        assert!(!cache.delete("b").unwrap());
        assert!(cache.delete("a").unwrap());
        assert!(cache.is_empty());
        assert_eq!(cache.directory(), None);
    }
}
