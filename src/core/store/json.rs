use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::files::{DiskFileStore, FileStore};
use crate::core::catalog::CatalogData;
use crate::core::error::{CollectError, CollectResult};

/// Persistence of one catalog mapping per (locale, group).
pub trait CatalogStore {
    /// The stored mapping, or an empty one when nothing is stored yet.
    fn load_group(&self, locale: &str, group: &str) -> CollectResult<CatalogData>;

    /// Root directory all catalogs live under.
    fn base_path(&self) -> &Path;

    /// Persist `data`, creating directories as needed. Returns the written path.
    fn save_group(&self, locale: &str, group: &str, data: &CatalogData) -> CollectResult<PathBuf>;
}

/// Catalogs stored as `<root>/<locale>/<group>.json`.
///
/// Files are written pretty-printed with 2-space indentation, key order
/// preserved and a trailing newline, so saving and re-loading a mapping
/// yields the same mapping.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore<F: FileStore = DiskFileStore> {
    root: PathBuf,
    files: F,
}

impl JsonCatalogStore<DiskFileStore> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_file_store(root, DiskFileStore::default())
    }
}

impl<F: FileStore> JsonCatalogStore<F> {
    pub fn with_file_store(root: impl Into<PathBuf>, files: F) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    pub fn group_path(&self, locale: &str, group: &str) -> PathBuf {
        self.root.join(locale).join(format!("{}.json", group))
    }
}

impl<F: FileStore> CatalogStore for JsonCatalogStore<F> {
    fn load_group(&self, locale: &str, group: &str) -> CollectResult<CatalogData> {
        let path = self.group_path(locale, group);
        if !self.files.exists(&path) {
            debug!("No catalog at {}, starting empty", path.display());
            return Ok(CatalogData::new());
        }

        let content = self.files.read_text(&path)?;
        if content.trim().is_empty() {
            return Ok(CatalogData::new());
        }

        let value: Value = serde_json::from_str(&content).map_err(|e| CollectError::Catalog {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(CollectError::Catalog {
                path,
                reason: "root of a catalog file must be an object".to_string(),
            }),
        }
    }

    fn base_path(&self) -> &Path {
        &self.root
    }

    fn save_group(&self, locale: &str, group: &str, data: &CatalogData) -> CollectResult<PathBuf> {
        let path = self.group_path(locale, group);
        if let Some(parent) = path.parent() {
            self.files.make_directory(parent)?;
        }

        let content = serde_json::to_string_pretty(data).map_err(|e| CollectError::Catalog {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        self.files.write_text(&path, &format!("{}\n", content))?;

        Ok(path)
    }
}
