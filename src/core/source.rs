use std::path::{Path, PathBuf};

/// Position of a token in a scanned file (1-based line and column).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: PathBuf,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<PathBuf>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

/// Byte offsets where each line of a text starts.
///
/// Line 1 starts at offset 0, line 2 after the first `'\n'`, and so on.
/// Lookups are O(log n).
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut starts = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                starts.push(i + 1);
            }
        }
        Self { starts }
    }

    /// 1-based line number containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// 1-based (line, column) for `offset`. Columns count characters, not bytes.
    pub fn line_col(&self, content: &str, offset: usize) -> (usize, usize) {
        let line = self.line(offset);
        let start = self.starts[line - 1];
        let end = offset.min(content.len());
        let col = content.get(start..end).map_or(1, |s| s.chars().count() + 1);
        (line, col)
    }

    /// Text of the given 1-based line without its line terminator.
    pub fn line_text<'a>(&self, content: &'a str, line: usize) -> &'a str {
        let Some(&start) = self.starts.get(line.wrapping_sub(1)) else {
            return "";
        };
        let end = self
            .starts
            .get(line)
            .map_or(content.len(), |next| next.saturating_sub(1));
        content
            .get(start..end)
            .unwrap_or("")
            .trim_end_matches('\r')
    }
}
