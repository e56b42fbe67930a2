//! Storage collaborators: source file access and catalog persistence.
//!
//! - `files`: `FileStore` trait and the on-disk implementation
//! - `json`: `CatalogStore` trait and the JSON-per-group implementation

pub mod files;
pub mod json;

pub use files::{DiskFileStore, FileStore};
pub use json::{CatalogStore, JsonCatalogStore};
