//! Turning a recognized call into a `(group, path)` translation key.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::calls::CompletedCall;

/// Argument shape of a recognized translation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    /// `trans('group.key', [...])`
    Simple,
    /// `trans_choice('group.key', $count, [...])`
    Pluralized,
}

/// Built-in recognition table: bare helpers and facade static calls.
pub const DEFAULT_FUNCTIONS: &[(&str, CallKind)] = &[
    ("trans", CallKind::Simple),
    ("trans_choice", CallKind::Pluralized),
    ("__", CallKind::Simple),
    ("Lang::get", CallKind::Simple),
    ("Lang::trans", CallKind::Simple),
    ("Lang::choice", CallKind::Pluralized),
    ("Lang::transChoice", CallKind::Pluralized),
];

/// Callee names considered translation calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionTable {
    entries: HashMap<String, CallKind>,
}

impl RecognitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: CallKind) {
        self.entries.insert(name.into(), kind);
    }

    /// Kind registered for `callee`. A leading `\` (fully qualified
    /// namespace) is ignored when the exact name is not registered.
    pub fn kind_of(&self, callee: &str) -> Option<CallKind> {
        self.entries.get(callee).copied().or_else(|| {
            callee
                .strip_prefix('\\')
                .and_then(|name| self.entries.get(name).copied())
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, CallKind)> for RecognitionTable {
    fn from_iter<I: IntoIterator<Item = (S, CallKind)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, kind) in iter {
            table.insert(name, kind);
        }
        table
    }
}

/// A group-qualified key referenced from source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtractedKey {
    /// Catalog file the key belongs to (text before the first `.`).
    pub group: String,
    /// Dot path inside the group (may contain further `.`).
    pub path: String,
}

impl ExtractedKey {
    pub fn new(group: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for ExtractedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.path)
    }
}

/// Strip the quotes of a raw literal and unescape its own quote character.
///
/// Only `\'` (single-quoted) or `\"` (double-quoted) is rewritten; every
/// other backslash sequence is kept verbatim.
pub fn unescape_literal(literal: &str) -> Option<String> {
    let quote = literal.chars().next().filter(|c| matches!(c, '\'' | '"'))?;
    let inner = literal
        .strip_prefix(quote)
        .and_then(|s| s.strip_suffix(quote))?;

    let escaped = if quote == '\'' { r"\'" } else { r#"\""# };
    Some(inner.replace(escaped, &quote.to_string()))
}

/// Split `group.path` on the first dot. Keys without a group or a path are rejected.
///
/// The group names a catalog file, so groups containing a path separator are
/// rejected too.
pub fn split_key(key: &str) -> Option<(&str, &str)> {
    key.split_once('.').filter(|(group, path)| {
        !group.is_empty() && !path.is_empty() && !group.contains(['/', '\\'])
    })
}

/// Decode the translation key of `call`, or `None` when the call is not a
/// recognized translation call with a grouped literal key.
pub fn decode(call: &CompletedCall<'_>, table: &RecognitionTable) -> Option<ExtractedKey> {
    table.kind_of(call.callee)?;
    let key = unescape_literal(call.first_argument()?)?;
    let (group, path) = split_key(&key)?;
    Some(ExtractedKey::new(group, path))
}
