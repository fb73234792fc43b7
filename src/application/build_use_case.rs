// ============================================================
// Layer 2 — BuildUseCase
// ============================================================
// Orchestrates the full dataset build in order:
//
//   Step 1: Validate the config       (fail before touching disk)
//   Step 2: Load .md files            (Layer 4 - data)
//   Step 3: Chunk into examples       (Layer 4 - data)
//   Step 4: Split train/test          (Layer 4 - data)
//   Step 5: Export both formats       (Layer 6 - infra)
//
// Nothing is written unless steps 1-4 all succeed. The two
// exporters are independent: if one fails the other still runs,
// and whatever was written stays on disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    chunker::Chunker,
    dataset::ExampleDataset,
    loader::MarkdownLoader,
    splitter::{split_train_test, DEFAULT_SEED},
};
use crate::domain::error::{ExportFailure, PipelineError};
use crate::domain::example::DatasetSplit;
use crate::domain::traits::{DatasetExporter, DocumentSource};
use crate::infra::{jsonl_store::JsonlStore, table_store::TableStore};

/// Characters of the first train example shown after a build
pub const PREVIEW_CHARS: usize = 200;

// ─── Build Configuration ─────────────────────────────────────────────────────
// Every option of a build run, immutable once the run starts.
// Serialisable so it can be saved next to the dataset and read
// back by `inspect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Root of the recursive .md search
    pub data_folder:      PathBuf,
    /// Window size in characters
    pub max_length:       usize,
    /// Characters the window advances per chunk
    pub stride:           usize,
    /// Fraction of examples held out for the test subset
    pub train_test_split: f64,
    /// Seed for the train/test shuffle
    pub seed:             u64,
    /// Destination of the table dataset directory
    pub output_folder:    PathBuf,
    pub train_json:       PathBuf,
    pub test_json:        PathBuf,
    /// Log and skip unreadable .md files instead of aborting
    pub skip_unreadable:  bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            data_folder:      PathBuf::from("data"),
            max_length:       512,
            stride:           256,
            train_test_split: 0.1,
            seed:             DEFAULT_SEED,
            output_folder:    PathBuf::from("dataset_split"),
            train_json:       PathBuf::from("dataset_train.json"),
            test_json:        PathBuf::from("dataset_test.json"),
            skip_unreadable:  false,
        }
    }
}

impl BuildConfig {
    /// Check every option and build the chunker they describe.
    pub fn validate(&self) -> Result<Chunker, PipelineError> {
        let chunker = Chunker::new(self.max_length, self.stride)?;

        // Also rejects NaN
        if !(self.train_test_split > 0.0 && self.train_test_split < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "train_test_split must be between 0 and 1 (exclusive), got {}",
                self.train_test_split
            )));
        }

        for (name, path) in [
            ("output_folder", &self.output_folder),
            ("train_json", &self.train_json),
            ("test_json", &self.test_json),
        ] {
            if path.as_os_str().is_empty() {
                return Err(PipelineError::InvalidConfig(format!("{name} must not be empty")));
            }
        }

        if self.train_json == self.test_json {
            return Err(PipelineError::InvalidConfig(format!(
                "train_json and test_json both point to '{}'",
                self.train_json.display()
            )));
        }

        if self.stride > self.max_length {
            tracing::warn!(
                "stride ({}) is larger than max_length ({}); {} characters between windows will be skipped",
                self.stride,
                self.max_length,
                self.stride - self.max_length,
            );
        }

        Ok(chunker)
    }
}

// ─── BuildReport ──────────────────────────────────────────────────────────────
/// What a successful build produced, for the CLI to print.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub documents: usize,
    pub examples:  usize,
    pub train:     usize,
    pub test:      usize,
    /// Every file the exporters wrote
    pub written:   Vec<PathBuf>,
    /// Truncated text of the first train example
    pub preview:   Option<String>,
}

// ─── BuildUseCase ─────────────────────────────────────────────────────────────
pub struct BuildUseCase {
    config: BuildConfig,
}

impl BuildUseCase {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Execute the full build end to end
    pub fn execute(&self) -> Result<BuildReport> {
        let cfg = &self.config;

        // ── Step 1: Validate before any I/O ──────────────────────────────────
        let chunker = cfg.validate()?;

        // ── Step 2: Load documents ────────────────────────────────────────────
        tracing::info!("Loading Markdown files from '{}'", cfg.data_folder.display());
        let loader = MarkdownLoader::new(&cfg.data_folder).skip_unreadable(cfg.skip_unreadable);
        let docs   = loader.load_all()?;

        // ── Step 3: Chunk every document into examples ────────────────────────
        let dataset  = ExampleDataset::from_documents(&docs, &chunker);
        let examples = dataset.len();

        // ── Step 4: Seeded train/test split ───────────────────────────────────
        let (train, test) = split_train_test(
            dataset.into_examples(),
            cfg.train_test_split,
            cfg.seed,
        )?;
        let split = DatasetSplit::new(train, test);
        tracing::debug!("Split {} examples with seed {}", split.len(), cfg.seed);
        tracing::info!("Train set: {}", split.train.len());
        tracing::info!("Validation set: {}", split.test.len());

        // ── Step 5: Export ────────────────────────────────────────────────────
        let written = self.export(&split)?;

        Ok(BuildReport {
            documents: docs.len(),
            examples,
            train:     split.train.len(),
            test:      split.test.len(),
            written,
            preview:   split.train.first().map(|e| e.preview(PREVIEW_CHARS)),
        })
    }

    /// Run every exporter, even after one fails.
    fn export(&self, split: &DatasetSplit) -> Result<Vec<PathBuf>> {
        let cfg = &self.config;
        let exporters: Vec<Box<dyn DatasetExporter>> = vec![
            Box::new(TableStore::new(&cfg.output_folder).with_build_config(cfg.clone())),
            Box::new(JsonlStore::new(&cfg.train_json, &cfg.test_json)),
        ];

        let mut written  = Vec::new();
        let mut failures = Vec::new();

        for exporter in &exporters {
            match exporter.export(split) {
                Ok(paths) => {
                    tracing::info!("Saved {} export ({} files)", exporter.target(), paths.len());
                    written.extend(paths);
                }
                Err(source) => {
                    tracing::error!("{} export failed: {}", exporter.target(), source);
                    failures.push(ExportFailure {
                        target: exporter.target(),
                        source,
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(PipelineError::Export(failures).into());
        }
        Ok(written)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Example;
    use crate::infra::jsonl_store::read_examples;
    use std::{fs, path::Path};
    use tempfile::{tempdir, TempDir};

    /// Config with every path inside `dir`
    fn config_in(dir: &Path) -> BuildConfig {
        BuildConfig {
            data_folder:   dir.join("data"),
            output_folder: dir.join("dataset_split"),
            train_json:    dir.join("dataset_train.json"),
            test_json:     dir.join("dataset_test.json"),
            ..BuildConfig::default()
        }
    }

    fn write_doc(cfg: &BuildConfig, name: &str, text: &str) {
        let path = cfg.data_folder.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    /// A corpus of `docs` documents, each long enough for several chunks
    fn corpus(docs: usize) -> (TempDir, BuildConfig) {
        let dir = tempdir().unwrap();
        let cfg = config_in(dir.path());
        for i in 0..docs {
            let text: String = (0..2000)
                .map(|j| char::from(b'a' + ((i * 7 + j) % 26) as u8))
                .collect();
            write_doc(&cfg, &format!("doc_{i:03}.md"), &format!("# Doc {i}\n\n{text}"));
        }
        (dir, cfg)
    }

    fn pipeline_error(err: &anyhow::Error) -> &PipelineError {
        err.downcast_ref::<PipelineError>()
            .unwrap_or_else(|| panic!("not a PipelineError: {err:#}"))
    }

    #[test]
    fn test_default_config_values() {
        let cfg = BuildConfig::default();
        assert_eq!(cfg.max_length, 512);
        assert_eq!(cfg.stride, 256);
        assert_eq!(cfg.train_test_split, 0.1);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.output_folder, PathBuf::from("dataset_split"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_options() {
        let bad = [
            BuildConfig { stride: 0, ..BuildConfig::default() },
            BuildConfig { max_length: 0, ..BuildConfig::default() },
            BuildConfig { train_test_split: 0.0, ..BuildConfig::default() },
            BuildConfig { train_test_split: 1.0, ..BuildConfig::default() },
            BuildConfig { train_test_split: f64::NAN, ..BuildConfig::default() },
            BuildConfig { output_folder: PathBuf::new(), ..BuildConfig::default() },
            BuildConfig { test_json: PathBuf::from("dataset_train.json"), ..BuildConfig::default() },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(PipelineError::InvalidConfig(_))),
                "accepted {cfg:?}"
            );
        }
    }

    #[test]
    fn test_invalid_config_checked_before_loading() {
        let dir = tempdir().unwrap();
        // data folder does not exist, but the stride error must win
        let cfg = BuildConfig { stride: 0, ..config_in(dir.path()) };
        let err = BuildUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(pipeline_error(&err), PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn test_single_600_char_file() {
        let dir = tempdir().unwrap();
        let cfg = config_in(dir.path());
        write_doc(&cfg, "only.md", &"x".repeat(600));

        let report = BuildUseCase::new(cfg).execute().unwrap();
        assert_eq!(report.documents, 1);
        assert_eq!(report.examples, 2);
        assert_eq!(report.train + report.test, 2);
    }

    #[test]
    fn test_empty_folder_writes_nothing() {
        let dir = tempdir().unwrap();
        let cfg = config_in(dir.path());
        fs::create_dir_all(&cfg.data_folder).unwrap();

        let err = BuildUseCase::new(cfg.clone()).execute().unwrap_err();
        assert!(matches!(pipeline_error(&err), PipelineError::NoInputData { .. }));
        assert!(!cfg.output_folder.exists());
        assert!(!cfg.train_json.exists());
        assert!(!cfg.test_json.exists());
    }

    #[test]
    fn test_only_tiny_documents_is_insufficient() {
        let dir = tempdir().unwrap();
        let cfg = config_in(dir.path());
        write_doc(&cfg, "tiny.md", &"y".repeat(100));

        let err = BuildUseCase::new(cfg.clone()).execute().unwrap_err();
        assert!(matches!(
            pipeline_error(&err),
            PipelineError::InsufficientData { examples: 0, .. }
        ));
        assert!(!cfg.output_folder.exists());
    }

    #[test]
    fn test_build_is_reproducible() {
        let (_dir, cfg) = corpus(5);
        let first = BuildUseCase::new(cfg.clone()).execute().unwrap();
        let first_test = read_examples(&cfg.test_json).unwrap();

        let second = BuildUseCase::new(cfg.clone()).execute().unwrap();
        let second_test = read_examples(&cfg.test_json).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_test, second_test);
    }

    #[test]
    fn test_jsonl_and_table_hold_the_same_split() {
        let (_dir, cfg) = corpus(4);
        let report = BuildUseCase::new(cfg.clone()).execute().unwrap();

        let from_json = JsonlStore::new(&cfg.train_json, &cfg.test_json).load().unwrap();
        let from_table = TableStore::new(&cfg.output_folder).load().unwrap();
        assert_eq!(from_json, from_table);
        assert_eq!(from_json.train.len(), report.train);
        assert_eq!(from_json.test.len(), report.test);
    }

    #[test]
    fn test_every_example_exported_exactly_once() {
        let (_dir, cfg) = corpus(3);
        BuildUseCase::new(cfg.clone()).execute().unwrap();

        let chunker = cfg.validate().unwrap();
        let docs    = MarkdownLoader::new(&cfg.data_folder).load_all().unwrap();
        let mut expected = ExampleDataset::from_documents(&docs, &chunker).into_examples();

        let mut exported: Vec<Example> = read_examples(&cfg.train_json)
            .unwrap()
            .into_iter()
            .chain(read_examples(&cfg.test_json).unwrap())
            .collect();

        for example in &exported {
            let len = example.text.chars().count();
            assert!((cfg.max_length / 4..=cfg.max_length).contains(&len));
        }

        expected.sort_by(|a, b| a.text.cmp(&b.text));
        exported.sort_by(|a, b| a.text.cmp(&b.text));
        assert_eq!(exported, expected);
    }

    #[test]
    fn test_thousand_examples_hold_out_a_tenth() {
        let dir = tempdir().unwrap();
        // window 10, stride 10 on 10_000 distinct-ish chars gives 1000 chunks
        let cfg = BuildConfig { max_length: 10, stride: 10, ..config_in(dir.path()) };
        let text: String = (0..10_000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        write_doc(&cfg, "big.md", &text);

        let report = BuildUseCase::new(cfg).execute().unwrap();
        assert_eq!(report.examples, 1000);
        assert_eq!(report.test, 100);
        assert_eq!(report.train, 900);
    }

    #[test]
    fn test_preview_is_first_train_example() {
        let (_dir, cfg) = corpus(2);
        let report = BuildUseCase::new(cfg.clone()).execute().unwrap();
        let train  = read_examples(&cfg.train_json).unwrap();

        let preview = report.preview.unwrap();
        assert_eq!(preview, train[0].preview(PREVIEW_CHARS));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
    }

    #[test]
    fn test_failed_export_leaves_the_other_in_place() {
        let (dir, mut cfg) = corpus(2);
        // A plain file where the dataset directory should go
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();
        cfg.output_folder = blocker;

        let err = BuildUseCase::new(cfg.clone()).execute().unwrap_err();
        match pipeline_error(&err) {
            PipelineError::Export(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].target, "table");
            }
            other => panic!("expected Export, got {other:?}"),
        }
        assert!(cfg.train_json.is_file());
        assert!(cfg.test_json.is_file());
    }
}
