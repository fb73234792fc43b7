// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every fatal condition the pipeline can hit, as one enum.
// The application layer wraps these in anyhow::Error, so the
// CLI still prints a full cause chain while tests can
// downcast back to the exact variant.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal pipeline conditions.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No non-empty Markdown documents under the data folder
    #[error("no usable .{extension} files found in '{}'", root.display())]
    NoInputData { root: PathBuf, extension: &'static str },

    /// A parameter combination that would never terminate or
    /// could only ever produce an empty dataset
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Too few examples to give both subsets at least one example
    #[error(
        "cannot split {examples} examples with test fraction {test_fraction}: \
         both train and test need at least one example"
    )]
    InsufficientData { examples: usize, test_fraction: f64 },

    /// A source file could not be read or is not valid UTF-8
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more exporters failed; the others were left in place
    #[error("export failed: {}", join_failures(.0))]
    Export(Vec<ExportFailure>),
}

/// Why a single exporter failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("malformed dataset: {0}")]
    Malformed(String),
}

/// An exporter's name paired with the reason it failed.
#[derive(Debug, Error)]
#[error("{target}: {source}")]
pub struct ExportFailure {
    pub target: &'static str,
    #[source]
    pub source: ExportError,
}

fn join_failures(failures: &[ExportFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
