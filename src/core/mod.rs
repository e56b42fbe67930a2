//! Core collection engine.
//!
//! Pipeline, leaves first:
//!
//! 1. `lexer`: raw text → tokens
//! 2. `calls`: tokens → completed `name(...)` calls
//! 3. `keys`: recognized calls → `(group, path)` keys
//! 4. `catalog`: lazily loaded translation catalogs
//! 5. `collector`: scan phase producing the missing keys
//! 6. `merge`: write phase merging placeholders into catalogs
//!
//! Collaborators live in `store` (files and catalog persistence) and
//! `template` (directive compiler).

pub mod calls;
pub mod catalog;
pub mod collector;
pub mod error;
pub mod keys;
pub mod lexer;
pub mod merge;
pub mod source;
pub mod store;
pub mod template;

pub use catalog::{Catalog, CatalogData};
pub use collector::{CollectOutcome, Collector, CollectorBuilder, MissingKeySet, MissingKeyUsage};
pub use error::{CollectError, CollectResult, ConfigError, LexError};
pub use keys::{CallKind, ExtractedKey, RecognitionTable};
pub use merge::{WrittenCatalog, merge};
pub use source::SourceLocation;
pub use store::{CatalogStore, DiskFileStore, FileStore, JsonCatalogStore};
pub use template::{DirectiveCompiler, TemplateCompiler};
