use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    ConfigError, DirectiveCompiler, DiskFileStore, JsonCatalogStore, RecognitionTable,
    keys::{CallKind, DEFAULT_FUNCTIONS},
    template::DEFAULT_DIRECTIVES,
};

pub const CONFIG_FILE_NAME: &str = ".transcollect.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Locale whose catalogs receive the missing keys.
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_lang_root")]
    pub lang_root: String,
    #[serde(default = "default_controllers_dir")]
    pub controllers_dir: String,
    #[serde(default = "default_views_dir")]
    pub views_dir: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Callee name → argument shape of recognized translation calls.
    #[serde(default = "default_functions")]
    pub functions: BTreeMap<String, CallKind>,
    /// Template directive → function it compiles to.
    #[serde(default = "default_directives")]
    pub directives: BTreeMap<String, String>,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_lang_root() -> String {
    "./lang".to_string()
}

fn default_controllers_dir() -> String {
    "app/controllers".to_string()
}

fn default_views_dir() -> String {
    "app/views".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["php".to_string()]
}

fn default_functions() -> BTreeMap<String, CallKind> {
    DEFAULT_FUNCTIONS
        .iter()
        .map(|(name, kind)| (name.to_string(), *kind))
        .collect()
}

fn default_directives() -> BTreeMap<String, String> {
    DEFAULT_DIRECTIVES
        .iter()
        .map(|(name, function)| (name.to_string(), function.to_string()))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            lang_root: default_lang_root(),
            controllers_dir: default_controllers_dir(),
            views_dir: default_views_dir(),
            extensions: default_extensions(),
            ignores: Vec::new(),
            functions: default_functions(),
            directives: default_directives(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.ignores {
            Pattern::new(pattern).map_err(|e| {
                ConfigError::Invalid(format!(
                    "invalid glob pattern in 'ignores': \"{}\": {}",
                    pattern, e
                ))
            })?;
        }

        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "'extensions' must list at least one file extension".to_string(),
            ));
        }

        if self.functions.keys().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "'functions' contains an empty function name".to_string(),
            ));
        }

        Ok(())
    }

    /// The locale to collect into; unset (empty) is a configuration error.
    pub fn current_locale(&self) -> Result<&str, ConfigError> {
        if self.locale.trim().is_empty() {
            Err(ConfigError::MissingLocale)
        } else {
            Ok(&self.locale)
        }
    }

    pub fn recognition_table(&self) -> RecognitionTable {
        self.functions
            .iter()
            .map(|(name, kind)| (name.clone(), *kind))
            .collect()
    }

    pub fn template_compiler(&self) -> DirectiveCompiler {
        DirectiveCompiler::new(self.directives.clone())
    }

    pub fn file_store(&self) -> Result<DiskFileStore, ConfigError> {
        let extensions = self
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty());
        DiskFileStore::new(extensions).with_ignores(&self.ignores)
    }

    pub fn catalog_store(&self, root: &Path) -> Result<JsonCatalogStore, ConfigError> {
        Ok(JsonCatalogStore::with_file_store(
            resolve_path(root, &self.lang_root),
            self.file_store()?,
        ))
    }

    /// Controller and view directories, resolved against `root`.
    pub fn scan_dirs(&self, root: &Path) -> Vec<PathBuf> {
        vec![
            resolve_path(root, &self.controllers_dir),
            resolve_path(root, &self.views_dir),
        ]
    }
}

/// Join a configured path onto the project root unless it is absolute.
pub fn resolve_path(root: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root.join(rel)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
