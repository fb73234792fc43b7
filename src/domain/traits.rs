// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only talks to these traits, so a
// different corpus format or output format is a new impl,
// not a change to the pipeline.
//
//   - MarkdownLoader implements DocumentSource
//   - TableStore and JsonlStore implement DatasetExporter

use anyhow::Result;
use std::path::PathBuf;

use crate::domain::document::Document;
use crate::domain::error::ExportError;
use crate::domain::example::DatasetSplit;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can load documents from a source.
pub trait DocumentSource {
    /// Load every usable document, in a deterministic order.
    fn load_all(&self) -> Result<Vec<Document>>;
}

// ─── DatasetExporter ──────────────────────────────────────────────────────────
/// Any component that can persist a train/test split.
///
/// Exporters are independent of each other: one failing never
/// undoes what another already wrote.
pub trait DatasetExporter {
    /// Short name used when reporting failures
    fn target(&self) -> &'static str;

    /// Write both subsets and return the paths that were written.
    fn export(&self, split: &DatasetSplit) -> Result<Vec<PathBuf>, ExportError>;
}
