use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::Collector,
};

/// A collector wired from the configuration file and command-line overrides.
pub struct CollectContext {
    pub collector: Collector,
    pub locale: String,
    pub scan_dirs: Vec<PathBuf>,
}

impl CollectContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let loaded = load_config(&root)?;
        if loaded.from_file {
            debug!("Using configuration file from {}", root.display());
        }

        let mut config = loaded.config;
        if let Some(locale) = &args.locale {
            config.locale = locale.clone();
        }
        // resolved against the project root like the config value
        if let Some(lang_root) = &args.lang_root {
            config.lang_root = lang_root.to_string_lossy().into_owned();
        }

        Self::from_config(&config, root)
    }

    fn from_config(config: &Config, root: PathBuf) -> Result<Self> {
        let locale = config.current_locale()?.to_string();
        let store = config.catalog_store(&root)?;

        let collector = Collector::builder()
            .file_store(config.file_store()?)
            .template_compiler(config.template_compiler())
            .catalog_store(store)
            .recognition_table(config.recognition_table())
            .build()?;

        Ok(Self {
            collector,
            locale,
            scan_dirs: config.scan_dirs(&root),
        })
    }
}
