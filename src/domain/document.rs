// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// Represents a single Markdown file loaded from disk.
// Just the path it came from and its trimmed text content.
//
// The path is only used for ordering and diagnostics; it never
// reaches the exported examples.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A non-empty document loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Full path of the source file
    pub source: PathBuf,

    /// File content with surrounding whitespace trimmed
    pub text: String,
}

impl Document {
    /// Create a new Document with a source path and text content.
    ///
    /// Example:
    ///   let doc = Document::new("notes/intro.md", "# Intro ...");
    pub fn new(source: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }

    /// Length in characters (Unicode scalar values), the unit the
    /// chunker counts in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
