// ============================================================
// Layer 4 — Markdown Loader
// ============================================================
// Walks a directory tree and loads every .md file it finds.
//
// Discovery rules:
//   - recursive, any depth below the root
//   - only files whose extension is exactly "md"; symlinks to
//     files are followed, symlinked directories are not entered
//   - sorted by full path so every run sees the same order
//
// Each file is read as UTF-8, line endings are normalised
// (\r\n and lone \r become \n), and the text is trimmed. Files that are empty
// after trimming are skipped without a warning. They simply
// contribute nothing.
//
// Files that cannot be read (permissions, broken encoding) stop
// the run by default. With `skip_unreadable` they are logged
// and skipped instead.

use anyhow::Result;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::domain::document::Document;
use crate::domain::error::PipelineError;
use crate::domain::traits::DocumentSource;

/// File extension the loader picks up
pub const MARKDOWN_EXTENSION: &str = "md";

/// Loads all Markdown files below a root directory.
/// Implements the DocumentSource trait from Layer 3.
pub struct MarkdownLoader {
    /// Root of the recursive search
    root: PathBuf,
    /// Log and skip unreadable files instead of failing
    skip_unreadable: bool,
}

impl MarkdownLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:            root.into(),
            skip_unreadable: false,
        }
    }

    pub fn skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// All matching file paths, sorted.
    fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if self.skip_unreadable => {
                    tracing::warn!("Skipping unreadable entry under '{}': {}", self.root.display(), e);
                    continue;
                }
                Err(e) => {
                    let path = e.path().unwrap_or(&self.root).to_path_buf();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                    return Err(PipelineError::Read { path, source }.into());
                }
            };

            // Path::is_file follows symlinks, DirEntry::file_type does not
            if entry.path().is_file() && has_markdown_extension(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        paths.sort();
        Ok(paths)
    }
}

impl DocumentSource for MarkdownLoader {
    fn load_all(&self) -> Result<Vec<Document>> {
        if !self.root.is_dir() {
            tracing::warn!("Data folder '{}' does not exist", self.root.display());
            return Err(no_input(&self.root).into());
        }

        let mut docs = Vec::new();

        for path in self.discover()? {
            match fs::read_to_string(&path) {
                Ok(raw) => {
                    let raw  = normalize_newlines(&raw);
                    let text = raw.trim();
                    if text.is_empty() {
                        tracing::debug!("Empty after trimming: {}", path.display());
                        continue;
                    }
                    let doc = Document::new(path, text);
                    tracing::debug!("Loaded: {} ({} chars)", doc.source.display(), doc.char_len());
                    docs.push(doc);
                }
                Err(e) if self.skip_unreadable => {
                    tracing::warn!("Skipping '{}': {}", path.display(), e);
                }
                Err(source) => return Err(PipelineError::Read { path, source }.into()),
            }
        }

        tracing::info!("Loaded {} Markdown files.", docs.len());

        if docs.is_empty() {
            return Err(no_input(&self.root).into());
        }
        Ok(docs)
    }
}

fn has_markdown_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MARKDOWN_EXTENSION)
}

/// Convert Windows and old Mac line endings to `\n`.
fn normalize_newlines(raw: &str) -> String {
    if !raw.contains('\r') {
        return raw.to_string();
    }
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

fn no_input(root: &Path) -> PipelineError {
    PipelineError::NoInputData {
        root:      root.to_path_buf(),
        extension: MARKDOWN_EXTENSION,
    }
}
