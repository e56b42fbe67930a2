//! Write phase: fold missing placeholders into the existing catalogs.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info};

use super::{
    catalog::{Catalog, CatalogData},
    collector::{MissingKeySet, count_leaves},
    error::CollectResult,
};

/// Recursively merge `missing` into `existing`.
///
/// Keys only on one side are kept; two mappings are merged recursively; in
/// every other collision the existing value wins, so a translated (or
/// intentionally blank) value is never replaced by a placeholder. Existing
/// keys keep their order, new keys follow in `missing` order.
pub fn merge(existing: &CatalogData, missing: &CatalogData) -> CatalogData {
    let mut merged = existing.clone();

    for (key, new_value) in missing {
        match merged.get_mut(key) {
            None => {
                merged.insert(key.clone(), new_value.clone());
            }
            Some(Value::Object(current)) => {
                if let Value::Object(new_map) = new_value {
                    *current = merge(current, new_map);
                }
            }
            Some(_) => {}
        }
    }

    merged
}

/// A catalog file updated by [`write_missing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenCatalog {
    pub group: String,
    pub path: PathBuf,
    /// Placeholders that were not in the catalog before.
    pub added: usize,
}

/// Merge each group of `missing` into the catalog of `locale` and persist it.
///
/// Groups are written in name order. A group is not touched when no
/// placeholder could be added, e.g. because existing leaves block them.
pub fn write_missing(
    catalog: &mut Catalog,
    locale: &str,
    missing: &MissingKeySet,
) -> CollectResult<Vec<WrittenCatalog>> {
    let mut written = Vec::new();

    for (group, placeholders) in missing.groups() {
        if placeholders.is_empty() {
            continue;
        }

        let existing = catalog.load(locale, group)?;
        let before = count_leaves(existing);
        let merged = merge(existing, placeholders);
        let added = count_leaves(&merged) - before;
        if added == 0 {
            debug!("No new keys for {}/{}, catalog left untouched", locale, group);
            continue;
        }

        catalog.replace(locale, group, merged);
        let path = catalog.save(locale, group)?;
        info!("Wrote {} new key(s) to {}", added, path.display());

        written.push(WrittenCatalog {
            group: group.to_string(),
            path,
            added,
        });
    }

    Ok(written)
}
