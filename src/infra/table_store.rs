// ============================================================
// Layer 6 — Table Dataset Store
// ============================================================
// Saves the train/test split as a dataset-dict directory that
// columnar tooling can reload directly.
//
// Layout:
//   dataset_split/
//     dataset_dict.json              ← {"splits": ["train", "test"]}
//     build_config.json              ← options the dataset was built with
//     train/
//       data-00000-of-00001.parquet  ← one UTF-8 column: text
//       dataset_info.json            ← feature schema + row count
//       state.json                   ← data file list + split name
//     test/
//       ...same three files...
//
// build_config.json lets `inspect` report how the dataset
// was produced.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Arc,
};

use parquet::{
    data_type::{ByteArray, ByteArrayType},
    file::{
        properties::WriterProperties,
        reader::{FileReader, SerializedFileReader},
        writer::SerializedFileWriter,
    },
    record::RowAccessor,
    schema::parser::parse_message_type,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::application::build_use_case::BuildConfig;
use crate::domain::error::ExportError;
use crate::domain::example::{DatasetSplit, Example, SPLIT_NAMES};
use crate::domain::traits::DatasetExporter;

pub const DATASET_DICT_FILE: &str = "dataset_dict.json";
pub const BUILD_CONFIG_FILE: &str = "build_config.json";
const DATA_FILE: &str = "data-00000-of-00001.parquet";
const INFO_FILE: &str = "dataset_info.json";
const STATE_FILE: &str = "state.json";

/// Name of the only column in every data file
const TEXT_COLUMN: &str = "text";
const TEXT_SCHEMA: &str = "message dataset { REQUIRED BYTE_ARRAY text (UTF8); }";

#[derive(Debug, Serialize, Deserialize)]
struct DatasetDict {
    splits: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FeatureInfo {
    dtype: String,
    #[serde(rename = "_type")]
    kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SplitInfo {
    split:        String,
    num_examples: usize,
    features:     BTreeMap<String, FeatureInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DataFile {
    filename: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SplitState {
    #[serde(rename = "_data_files")]
    data_files: Vec<DataFile>,
    #[serde(rename = "_split")]
    split: String,
}

/// Reads and writes the dataset-dict directory.
pub struct TableStore {
    /// Root of the dataset directory
    dir: PathBuf,
    /// Written next to the data when set
    build_config: Option<BuildConfig>,
}

impl TableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir:          dir.into(),
            build_config: None,
        }
    }

    /// Record the options used for this build alongside the data.
    pub fn with_build_config(mut self, config: BuildConfig) -> Self {
        self.build_config = Some(config);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every split listed in dataset_dict.json.
    pub fn load(&self) -> Result<DatasetSplit, ExportError> {
        let dict: DatasetDict = read_json(&self.dir.join(DATASET_DICT_FILE))?;

        let mut split = DatasetSplit::default();
        for name in &dict.splits {
            let examples = self.load_split(name)?;
            match name.as_str() {
                "train" => split.train = examples,
                "test"  => split.test = examples,
                other   => {
                    return Err(ExportError::Malformed(format!("unknown split '{other}'")));
                }
            }
        }

        tracing::debug!(
            "Loaded dataset from '{}': {} train, {} test",
            self.dir.display(),
            split.train.len(),
            split.test.len(),
        );
        Ok(split)
    }

    /// Read build_config.json, if the dataset has one.
    pub fn load_build_config(&self) -> Result<Option<BuildConfig>, ExportError> {
        let path = self.dir.join(BUILD_CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(read_json(&path)?))
    }

    fn load_split(&self, name: &str) -> Result<Vec<Example>, ExportError> {
        let split_dir = self.dir.join(name);
        let state: SplitState = read_json(&split_dir.join(STATE_FILE))?;
        if state.split != name {
            return Err(ExportError::Malformed(format!(
                "'{}' holds split '{}', expected '{}'",
                split_dir.display(),
                state.split,
                name
            )));
        }

        let mut examples = Vec::new();
        for file in &state.data_files {
            examples.extend(read_parquet(&split_dir.join(&file.filename))?);
        }
        Ok(examples)
    }

    fn save_split(&self, name: &str, examples: &[Example]) -> Result<PathBuf, ExportError> {
        let split_dir = self.dir.join(name);
        fs::create_dir_all(&split_dir)?;

        let data_path = split_dir.join(DATA_FILE);
        write_parquet(&data_path, examples)?;

        let mut features = BTreeMap::new();
        features.insert(
            TEXT_COLUMN.to_string(),
            FeatureInfo {
                dtype: "string".to_string(),
                kind:  "Value".to_string(),
            },
        );
        write_json(
            &split_dir.join(INFO_FILE),
            &SplitInfo {
                split: name.to_string(),
                num_examples: examples.len(),
                features,
            },
        )?;
        write_json(
            &split_dir.join(STATE_FILE),
            &SplitState {
                data_files: vec![DataFile { filename: DATA_FILE.to_string() }],
                split:      name.to_string(),
            },
        )?;

        tracing::debug!("Saved {} '{}' rows to '{}'", examples.len(), name, data_path.display());
        Ok(data_path)
    }
}

impl DatasetExporter for TableStore {
    fn target(&self) -> &'static str {
        "table"
    }

    fn export(&self, split: &DatasetSplit) -> Result<Vec<PathBuf>, ExportError> {
        // create_dir_all is a no-op when the folder already exists
        fs::create_dir_all(&self.dir)?;

        let mut written = Vec::new();
        for (name, examples) in split.subsets() {
            written.push(self.save_split(name, examples)?);
        }

        let dict_path = self.dir.join(DATASET_DICT_FILE);
        write_json(
            &dict_path,
            &DatasetDict {
                splits: SPLIT_NAMES.iter().map(|s| s.to_string()).collect(),
            },
        )?;
        written.push(dict_path);

        if let Some(config) = &self.build_config {
            let config_path = self.dir.join(BUILD_CONFIG_FILE);
            write_json(&config_path, config)?;
            written.push(config_path);
        }

        Ok(written)
    }
}

fn write_parquet(path: &Path, examples: &[Example]) -> Result<(), ExportError> {
    let schema = Arc::new(parse_message_type(TEXT_SCHEMA)?);
    let props  = Arc::new(WriterProperties::builder().build());

    let mut writer    = SerializedFileWriter::new(File::create(path)?, schema, props)?;
    let mut row_group = writer.next_row_group()?;

    if let Some(mut column) = row_group.next_column()? {
        let values: Vec<ByteArray> = examples
            .iter()
            .map(|e| ByteArray::from(e.text.as_str()))
            .collect();
        column
            .typed::<ByteArrayType>()
            .write_batch(&values, None, None)?;
        column.close()?;
    }

    row_group.close()?;
    writer.close()?;
    Ok(())
}

fn read_parquet(path: &Path) -> Result<Vec<Example>, ExportError> {
    let reader = SerializedFileReader::new(File::open(path)?)?;

    let schema = reader.metadata().file_metadata().schema_descr();
    if schema.num_columns() != 1 || schema.column(0).name() != TEXT_COLUMN {
        return Err(ExportError::Malformed(format!(
            "'{}' is not a single '{}' column file",
            path.display(),
            TEXT_COLUMN
        )));
    }

    let mut examples = Vec::new();
    for row in reader.get_row_iter(None)? {
        let row = row?;
        examples.push(Example::new(row.get_string(0)?.as_str()));
    }
    Ok(examples)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ExportError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
