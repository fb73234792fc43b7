// ============================================================
// Layer 6 — JSON Lines Store
// ============================================================
// Writes each subset as newline-delimited JSON, one example per
// line, exactly:
//
//   {"text":"first chunk ..."}
//   {"text":"second chunk ..."}
//
// serde_json escapes quotes, backslashes, newlines and control
// characters, so a line never contains a raw newline and every
// line parses back to the identical string.
//
// Output files (paths are configurable):
//   dataset_train.json   ← train subset
//   dataset_test.json    ← test subset

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::error::ExportError;
use crate::domain::example::{DatasetSplit, Example};
use crate::domain::traits::DatasetExporter;

/// Reads and writes train/test subsets as JSON Lines files.
pub struct JsonlStore {
    train_path: PathBuf,
    test_path:  PathBuf,
}

impl JsonlStore {
    pub fn new(train_path: impl Into<PathBuf>, test_path: impl Into<PathBuf>) -> Self {
        Self {
            train_path: train_path.into(),
            test_path:  test_path.into(),
        }
    }

    pub fn train_path(&self) -> &Path {
        &self.train_path
    }

    pub fn test_path(&self) -> &Path {
        &self.test_path
    }

    /// Read both files back into a split.
    pub fn load(&self) -> Result<DatasetSplit, ExportError> {
        Ok(DatasetSplit::new(
            read_examples(&self.train_path)?,
            read_examples(&self.test_path)?,
        ))
    }
}

impl DatasetExporter for JsonlStore {
    fn target(&self) -> &'static str {
        "jsonl"
    }

    fn export(&self, split: &DatasetSplit) -> Result<Vec<PathBuf>, ExportError> {
        write_examples(&self.train_path, &split.train)?;
        write_examples(&self.test_path, &split.test)?;
        Ok(vec![self.train_path.clone(), self.test_path.clone()])
    }
}

/// Write `examples` to `path`, one JSON object per line.
/// Parent directories are created when missing.
pub fn write_examples(path: &Path, examples: &[Example]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut out = BufWriter::new(File::create(path)?);
    for example in examples {
        serde_json::to_writer(&mut out, example)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    tracing::debug!("Wrote {} examples to '{}'", examples.len(), path.display());
    Ok(())
}

/// Read a JSON Lines file written by [`write_examples`].
pub fn read_examples(path: &Path) -> Result<Vec<Example>, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    let mut examples = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let example: Example = serde_json::from_str(&line).map_err(|e| {
            ExportError::Malformed(format!("{} line {}: {}", path.display(), index + 1, e))
        })?;
        examples.push(example);
    }

    Ok(examples)
}
