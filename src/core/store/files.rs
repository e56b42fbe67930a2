use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::error::{CollectError, CollectResult, ConfigError};

/// Filesystem access used by the collector and the catalog store.
pub trait FileStore {
    /// Every scannable file beneath `dir`, recursively, in a stable order.
    fn list_files(&self, dir: &Path) -> CollectResult<Vec<PathBuf>>;

    fn read_text(&self, path: &Path) -> CollectResult<String>;

    fn exists(&self, path: &Path) -> bool;

    fn write_text(&self, path: &Path, content: &str) -> CollectResult<()>;

    /// Create `path` and any missing parents.
    fn make_directory(&self, path: &Path) -> CollectResult<()>;
}

/// [`FileStore`] backed by the local disk.
#[derive(Debug, Clone)]
pub struct DiskFileStore {
    extensions: Vec<String>,
    ignores: Vec<Pattern>,
}

impl DiskFileStore {
    /// Store that lists files with any of the given extensions (without the dot).
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            ignores: Vec::new(),
        }
    }

    /// Skip listed paths matching any of the glob `patterns`.
    pub fn with_ignores(mut self, patterns: &[String]) -> Result<Self, ConfigError> {
        for p in patterns {
            let pattern = Pattern::new(p).map_err(|e| {
                ConfigError::Invalid(format!("invalid glob pattern in 'ignores': \"{}\": {}", p, e))
            })?;
            self.ignores.push(pattern);
        }
        Ok(self)
    }

    fn is_scannable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.ignores.iter().any(|p| p.matches(&path_str))
    }
}

impl Default for DiskFileStore {
    fn default() -> Self {
        Self::new(["php"])
    }
}

impl FileStore for DiskFileStore {
    fn list_files(&self, dir: &Path) -> CollectResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            warn!("Scan directory does not exist: {}", dir.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                CollectError::io(path, e.into())
            })?;
            let path = entry.path();

            if !entry.file_type().is_file() || !self.is_scannable(path) {
                continue;
            }
            if self.is_ignored(path) {
                debug!("Ignoring {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn read_text(&self, path: &Path) -> CollectResult<String> {
        fs::read_to_string(path).map_err(|e| CollectError::io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_text(&self, path: &Path, content: &str) -> CollectResult<()> {
        fs::write(path, content).map_err(|e| CollectError::io(path, e))
    }

    fn make_directory(&self, path: &Path) -> CollectResult<()> {
        fs::create_dir_all(path).map_err(|e| CollectError::io(path, e))
    }
}
