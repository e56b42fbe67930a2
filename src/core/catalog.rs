//! In-memory view of the translation catalogs of a run.
//!
//! Each (locale, group) mapping is loaded from the [`CatalogStore`] the first
//! time a key of that group is tested, then reused until the run ends.

use std::{
    collections::{HashMap, hash_map::Entry},
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::debug;

use super::error::CollectResult;
use super::store::CatalogStore;

/// Nested catalog mapping. Objects are inner nodes, anything else is a leaf.
pub type CatalogData = Map<String, Value>;

pub struct Catalog {
    store: Box<dyn CatalogStore>,
    loaded: HashMap<(String, String), CatalogData>,
}

impl Catalog {
    pub fn new(store: Box<dyn CatalogStore>) -> Self {
        Self {
            store,
            loaded: HashMap::new(),
        }
    }

    /// Mapping for `(locale, group)`, loading it on first access.
    pub fn load(&mut self, locale: &str, group: &str) -> CollectResult<&CatalogData> {
        match self.loaded.entry((locale.to_string(), group.to_string())) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!("Loading catalog {}/{}", locale, group);
                let data = self.store.load_group(locale, group)?;
                Ok(entry.insert(data))
            }
        }
    }

    /// Whether `path` resolves to any value in the group, empty strings included.
    pub fn has(&mut self, locale: &str, group: &str, path: &str) -> CollectResult<bool> {
        let data = self.load(locale, group)?;
        Ok(lookup(data, path).is_some())
    }

    pub fn base_path(&self) -> &Path {
        self.store.base_path()
    }

    /// Swap in a new mapping for `(locale, group)` after scanning finished.
    pub fn replace(&mut self, locale: &str, group: &str, data: CatalogData) {
        self.loaded
            .insert((locale.to_string(), group.to_string()), data);
    }

    /// Persist the current mapping of `(locale, group)`.
    pub fn save(&mut self, locale: &str, group: &str) -> CollectResult<PathBuf> {
        self.load(locale, group)?;
        let data = &self.loaded[&(locale.to_string(), group.to_string())];
        self.store.save_group(locale, group, data)
    }

    /// Number of (locale, group) mappings loaded so far.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

/// Resolve a dot path inside `data`.
///
/// A literal key equal to the whole path takes precedence over the nested
/// walk, so flat keys such as `"nav.home"` are found too.
pub fn lookup<'a>(data: &'a CatalogData, path: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(path) {
        return Some(value);
    }

    let mut segments = path.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
