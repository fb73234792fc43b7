// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with clap and prints results.
// All pipeline work is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `build`   — Markdown folder → train/test datasets
//   2. `inspect` — reload a built dataset and summarise it

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BuildArgs, Commands, InspectArgs};

use crate::application::build_use_case::BuildReport;
use crate::application::inspect_use_case::DatasetSummary;

#[derive(Parser, Debug)]
#[command(
    name = "md-dataset",
    version,
    about = "Turn a folder of Markdown files into overlapping text chunks and train/test datasets."
)]
pub struct Cli {
    /// The subcommand to run (build or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Build(args)   => run_build(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_build(args: BuildArgs) -> Result<()> {
    use crate::application::build_use_case::BuildUseCase;

    let use_case = BuildUseCase::new(args.into());
    let report   = use_case.execute()?;
    print_build_report(&report, &use_case.config().output_folder);
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let use_case = InspectUseCase::new(args.output_folder, args.train_json, args.test_json);
    print_summary(&use_case.summary()?);
    Ok(())
}

// Counts are already logged by the pipeline; this prints where things went.
fn print_build_report(report: &BuildReport, output_folder: &std::path::Path) {
    println!(
        "Saved {} examples ({} train / {} test) from {} files to '{}/'",
        report.examples,
        report.train,
        report.test,
        report.documents,
        output_folder.display()
    );
    for path in &report.written {
        println!("  {}", path.display());
    }

    if let Some(preview) = &report.preview {
        println!("\n--- Sample text chunk from training set ---");
        println!("{preview}");
    }
}

fn print_summary(summary: &DatasetSummary) {
    println!("Dataset: '{}'", summary.dir.display());
    println!("Train set: {}", summary.train);
    println!("Validation set: {}", summary.test);

    match &summary.config {
        Some(cfg) => println!(
            "Built from '{}' with max_length={} stride={} train_test_split={} seed={}",
            cfg.data_folder.display(),
            cfg.max_length,
            cfg.stride,
            cfg.train_test_split,
            cfg.seed,
        ),
        None => println!("No build config recorded."),
    }

    if summary.jsonl_checked {
        println!("JSON Lines export matches the table dataset.");
    }

    if let Some(preview) = &summary.preview {
        println!("\n--- Sample text chunk from training set ---");
        println!("{preview}");
    }
}
