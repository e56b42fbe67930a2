//! Scan phase: find every referenced key that the catalog does not know.
//!
//! For each file the collector runs
//! `read → compile templates → tokenize → extract calls → decode keys`,
//! tests each key against the [`Catalog`] and records the unknown ones as
//! empty placeholders in a [`MissingKeySet`]. The catalog is only read here;
//! writing happens afterwards in [`crate::core::merge`].

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::debug;

use super::{
    calls::extract_calls,
    catalog::{Catalog, CatalogData},
    error::{CollectError, CollectResult, ConfigError},
    keys::{DEFAULT_FUNCTIONS, ExtractedKey, RecognitionTable, decode},
    lexer::tokenize,
    merge::{WrittenCatalog, write_missing},
    source::{LineIndex, SourceLocation},
    store::{CatalogStore, FileStore},
    template::TemplateCompiler,
};

/// Keys absent from the catalog, per group, as nested placeholder mappings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingKeySet {
    groups: BTreeMap<String, CatalogData>,
}

impl MissingKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an empty placeholder at `key`. Returns false if nothing changed.
    ///
    /// A nested mapping always wins over a placeholder at the same position,
    /// so `a.b` and `a.b.c` give the same result in either order.
    pub fn insert(&mut self, key: &ExtractedKey) -> bool {
        let root = self.groups.entry(key.group.clone()).or_default();
        let segments: Vec<&str> = key.path.split('.').collect();
        insert_placeholder(root, &segments)
    }

    pub fn group(&self, group: &str) -> Option<&CatalogData> {
        self.groups.get(group)
    }

    /// Groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &CatalogData)> {
        self.groups.iter().map(|(name, data)| (name.as_str(), data))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of placeholders across all groups.
    pub fn key_count(&self) -> usize {
        self.groups.values().map(count_leaves).sum()
    }
}

fn insert_placeholder(root: &mut Map<String, Value>, path: &[&str]) -> bool {
    let Some((first, rest)) = path.split_first() else {
        return false;
    };

    if rest.is_empty() {
        if root.contains_key(*first) {
            return false;
        }
        root.insert(first.to_string(), Value::String(String::new()));
        return true;
    }

    let next_level = root
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !next_level.is_object() {
        *next_level = Value::Object(Map::new());
    }

    match next_level {
        Value::Object(inner) => insert_placeholder(inner, rest),
        _ => false,
    }
}

/// Number of non-object values in a nested mapping.
pub fn count_leaves(data: &CatalogData) -> usize {
    data.values()
        .map(|value| match value {
            Value::Object(inner) => count_leaves(inner),
            _ => 1,
        })
        .sum()
}

/// One reference to a missing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyUsage {
    pub key: ExtractedKey,
    pub location: SourceLocation,
    /// The referencing line of the raw file, for display.
    pub source_line: String,
}

/// Result of the scan phase.
#[derive(Debug, Default)]
pub struct CollectOutcome {
    pub missing: MissingKeySet,
    /// Every reference to a missing key, sorted by location.
    pub usages: Vec<MissingKeyUsage>,
    pub files_scanned: usize,
}

/// Builder wiring the collaborators of a [`Collector`].
///
/// `build` fails with a [`ConfigError`] when a collaborator is missing.
pub struct CollectorBuilder {
    files: Option<Box<dyn FileStore>>,
    compiler: Option<Box<dyn TemplateCompiler>>,
    store: Option<Box<dyn CatalogStore>>,
    table: RecognitionTable,
}

impl Default for CollectorBuilder {
    fn default() -> Self {
        Self {
            files: None,
            compiler: None,
            store: None,
            table: DEFAULT_FUNCTIONS.iter().copied().collect(),
        }
    }
}

impl CollectorBuilder {
    pub fn file_store(mut self, files: impl FileStore + 'static) -> Self {
        self.files = Some(Box::new(files));
        self
    }

    pub fn template_compiler(mut self, compiler: impl TemplateCompiler + 'static) -> Self {
        self.compiler = Some(Box::new(compiler));
        self
    }

    pub fn catalog_store(mut self, store: impl CatalogStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn recognition_table(mut self, table: RecognitionTable) -> Self {
        self.table = table;
        self
    }

    pub fn build(self) -> Result<Collector, ConfigError> {
        let store = self.store.ok_or(ConfigError::MissingCatalogStore)?;
        let compiler = self.compiler.ok_or(ConfigError::MissingTemplateCompiler)?;
        let files = self.files.ok_or(ConfigError::MissingFileStore)?;
        if self.table.is_empty() {
            return Err(ConfigError::Invalid(
                "no translation functions configured".to_string(),
            ));
        }

        Ok(Collector {
            files,
            compiler,
            catalog: Catalog::new(store),
            table: self.table,
        })
    }
}

pub struct Collector {
    files: Box<dyn FileStore>,
    compiler: Box<dyn TemplateCompiler>,
    catalog: Catalog,
    table: RecognitionTable,
}

impl Collector {
    pub fn builder() -> CollectorBuilder {
        CollectorBuilder::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Scan every file beneath `dirs` for keys missing in `locale`.
    pub fn collect_dirs(&mut self, dirs: &[PathBuf], locale: &str) -> CollectResult<CollectOutcome> {
        let mut files = Vec::new();
        for dir in dirs {
            files.extend(self.files.list_files(dir)?);
        }
        self.collect(&files, locale)
    }

    /// Scan `files` for keys missing in `locale`.
    pub fn collect(&mut self, files: &[PathBuf], locale: &str) -> CollectResult<CollectOutcome> {
        if locale.is_empty() {
            return Err(ConfigError::MissingLocale.into());
        }

        let mut outcome = CollectOutcome::default();
        for file in files {
            self.scan_file(file, locale, &mut outcome)?;
            outcome.files_scanned += 1;
        }

        outcome.usages.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| a.key.cmp(&b.key))
        });
        Ok(outcome)
    }

    fn scan_file(
        &mut self,
        path: &Path,
        locale: &str,
        outcome: &mut CollectOutcome,
    ) -> CollectResult<()> {
        let raw = self.files.read_text(path)?;
        let compiled = self.compiler.compile(&raw);
        let compiled_index = LineIndex::new(&compiled);

        let tokens = tokenize(&compiled).map_err(|source| {
            let (line, col) = compiled_index.line_col(&compiled, source.offset);
            CollectError::Lex {
                file: path.to_path_buf(),
                line,
                col,
                source,
            }
        })?;

        let raw_index = LineIndex::new(&raw);
        let mut found = 0;
        for call in extract_calls(&tokens) {
            let Some(key) = decode(&call, &self.table) else {
                continue;
            };
            found += 1;
            if self.catalog.has(locale, &key.group, &key.path)? {
                continue;
            }

            let (line, col) = compiled_index.line_col(&compiled, call.offset);
            outcome.missing.insert(&key);
            outcome.usages.push(MissingKeyUsage {
                key,
                location: SourceLocation::new(path, line, col),
                source_line: raw_index.line_text(&raw, line).to_string(),
            });
        }

        debug!("Scanned {} ({} translation keys)", path.display(), found);
        Ok(())
    }

    /// Merge `missing` into the catalogs of `locale` and persist every touched group.
    pub fn write_missing(
        &mut self,
        locale: &str,
        missing: &MissingKeySet,
    ) -> CollectResult<Vec<WrittenCatalog>> {
        write_missing(&mut self.catalog, locale, missing)
    }
}
