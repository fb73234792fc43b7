// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `build` and `inspect`
// and all their configurable flags.
//
// Defaults match BuildConfig::default(), so running
// `md-dataset build` with no flags reads ./data and writes
// ./dataset_split, ./dataset_train.json and ./dataset_test.json.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::build_use_case::BuildConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chunk a folder of Markdown files and write train/test datasets
    Build(BuildArgs),

    /// Reload a built dataset and report what it contains
    Inspect(InspectArgs),
}

/// All arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory searched recursively for .md files
    #[arg(long, default_value = "data")]
    pub data_folder: PathBuf,

    /// Maximum characters per text chunk
    #[arg(long, default_value_t = 512)]
    pub max_length: usize,

    /// Characters the window moves between chunks;
    /// max_length - stride characters are shared by neighbours
    #[arg(long, default_value_t = 256)]
    pub stride: usize,

    /// Fraction of chunks held out as the test set
    #[arg(long, default_value_t = 0.1)]
    pub train_test_split: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output directory for the table (Parquet) dataset
    #[arg(long, default_value = "dataset_split")]
    pub output_folder: PathBuf,

    /// JSON Lines file for the train split
    #[arg(long, default_value = "dataset_train.json")]
    pub train_json: PathBuf,

    /// JSON Lines file for the test split
    #[arg(long, default_value = "dataset_test.json")]
    pub test_json: PathBuf,

    /// Warn about and skip unreadable .md files instead of aborting
    #[arg(long)]
    pub skip_unreadable: bool,
}

/// Convert CLI BuildArgs into the application-layer BuildConfig.
/// The application layer never sees clap types.
impl From<BuildArgs> for BuildConfig {
    fn from(a: BuildArgs) -> Self {
        BuildConfig {
            data_folder:      a.data_folder,
            max_length:       a.max_length,
            stride:           a.stride,
            train_test_split: a.train_test_split,
            seed:             a.seed,
            output_folder:    a.output_folder,
            train_json:       a.train_json,
            test_json:        a.test_json,
            skip_unreadable:  a.skip_unreadable,
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory written by `build`
    #[arg(long, default_value = "dataset_split")]
    pub output_folder: PathBuf,

    /// Train JSON Lines file to cross-check, if present
    #[arg(long, default_value = "dataset_train.json")]
    pub train_json: PathBuf,

    /// Test JSON Lines file to cross-check, if present
    #[arg(long, default_value = "dataset_test.json")]
    pub test_json: PathBuf,
}
