// ============================================================
// Layer 2 — Inspect Use Case
// ============================================================
// Reloads a dataset written by `build`:
//   1. Load both splits from the table directory
//   2. Read the build config saved next to them, if any
//   3. If the JSON Lines files exist, check they hold exactly
//      the same examples in the same order

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::application::build_use_case::{BuildConfig, PREVIEW_CHARS};
use crate::domain::example::Example;
use crate::infra::{jsonl_store::JsonlStore, table_store::TableStore};

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub dir:           PathBuf,
    pub train:         usize,
    pub test:          usize,
    pub config:        Option<BuildConfig>,
    pub preview:       Option<String>,
    /// True when the JSON Lines files were found and matched
    pub jsonl_checked: bool,
}

pub struct InspectUseCase {
    table: TableStore,
    jsonl: JsonlStore,
}

impl InspectUseCase {
    pub fn new(output_folder: PathBuf, train_json: PathBuf, test_json: PathBuf) -> Self {
        Self {
            table: TableStore::new(output_folder),
            jsonl: JsonlStore::new(train_json, test_json),
        }
    }

    pub fn summary(&self) -> Result<DatasetSummary> {
        let dir = self.table.dir().to_path_buf();

        let split = self.table.load().with_context(|| {
            format!(
                "Cannot load dataset from '{}'. Have you run 'build' first?",
                dir.display()
            )
        })?;
        let config = self
            .table
            .load_build_config()
            .with_context(|| format!("Cannot read build config in '{}'", dir.display()))?;

        let jsonl_checked = self.jsonl.train_path().is_file() && self.jsonl.test_path().is_file();
        if jsonl_checked {
            let from_json = self.jsonl.load().context("Cannot read JSON Lines export")?;
            compare_subset("train", &split.train, &from_json.train, self.jsonl.train_path())?;
            compare_subset("test", &split.test, &from_json.test, self.jsonl.test_path())?;
        } else {
            tracing::info!("JSON Lines files not found, skipping cross-check");
        }

        Ok(DatasetSummary {
            dir,
            train: split.train.len(),
            test: split.test.len(),
            config,
            preview: split.train.first().map(|e| e.preview(PREVIEW_CHARS)),
            jsonl_checked,
        })
    }
}

fn compare_subset(
    name:  &str,
    table: &[Example],
    jsonl: &[Example],
    path:  &std::path::Path,
) -> Result<()> {
    if table.len() != jsonl.len() {
        bail!(
            "{name} subset has {} rows in the table dataset but {} lines in '{}'",
            table.len(),
            jsonl.len(),
            path.display()
        );
    }
    if let Some(row) = table.iter().zip(jsonl).position(|(a, b)| a != b) {
        bail!(
            "{name} subset differs from '{}' at line {}",
            path.display(),
            row + 1
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::build_use_case::BuildUseCase;
    use crate::infra::jsonl_store::write_examples;
    use std::fs;
    use tempfile::tempdir;

    fn built_dataset(dir: &std::path::Path) -> BuildConfig {
        let cfg = BuildConfig {
            data_folder:   dir.join("data"),
            output_folder: dir.join("out"),
            train_json:    dir.join("train.json"),
            test_json:     dir.join("test.json"),
            max_length:    64,
            stride:        32,
            ..BuildConfig::default()
        };
        fs::create_dir_all(&cfg.data_folder).unwrap();
        let text: String = (0..3000).map(|i| char::from(b'a' + (i % 23) as u8)).collect();
        fs::write(cfg.data_folder.join("doc.md"), text).unwrap();
        BuildUseCase::new(cfg.clone()).execute().unwrap();
        cfg
    }

    fn inspect(cfg: &BuildConfig) -> InspectUseCase {
        InspectUseCase::new(
            cfg.output_folder.clone(),
            cfg.train_json.clone(),
            cfg.test_json.clone(),
        )
    }

    #[test]
    fn test_summary_matches_build() {
        let dir = tempdir().unwrap();
        let cfg = built_dataset(dir.path());

        let summary = inspect(&cfg).summary().unwrap();
        assert!(summary.jsonl_checked);
        assert_eq!(summary.config, Some(cfg.clone()));
        assert!(summary.test > 0);
        assert!(summary.train > summary.test);
        assert!(summary.preview.is_some());
    }

    #[test]
    fn test_missing_jsonl_skips_check() {
        let dir = tempdir().unwrap();
        let cfg = built_dataset(dir.path());
        fs::remove_file(&cfg.test_json).unwrap();

        let summary = inspect(&cfg).summary().unwrap();
        assert!(!summary.jsonl_checked);
    }

    #[test]
    fn test_tampered_jsonl_is_reported() {
        let dir = tempdir().unwrap();
        let cfg = built_dataset(dir.path());

        let mut train = crate::infra::jsonl_store::read_examples(&cfg.train_json).unwrap();
        train[1] = Example::new("edited");
        write_examples(&cfg.train_json, &train).unwrap();

        let err = inspect(&cfg).summary().unwrap_err();
        assert!(err.to_string().contains("at line 2"), "{err:#}");
    }

    #[test]
    fn test_missing_dataset_has_hint() {
        let dir = tempdir().unwrap();
        let cfg = BuildConfig {
            output_folder: dir.path().join("nothing"),
            ..BuildConfig::default()
        };
        let err = inspect(&cfg).summary().unwrap_err();
        assert!(err.to_string().contains("Have you run 'build' first?"));
    }
}
