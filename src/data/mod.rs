// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the Markdown files on disk and the two
// in-memory train/test subsets.
//
// The pipeline flows in this order:
//
//   .md files
//       │
//       ▼
//   MarkdownLoader    → walks the folder, reads and trims text
//       │
//       ▼
//   Chunker           → slides a fixed window over each document
//       │
//       ▼
//   ExampleDataset    → flattens all chunks into Examples
//       │
//       ▼
//   split_train_test  → seeded shuffle into train / test
//
// Each module is responsible for exactly one step, so each step
// is independently testable.

/// Finds and reads .md files below a root folder
pub mod loader;

/// Splits documents into overlapping character windows
pub mod chunker;

/// Aggregates chunks from all documents into one example list
pub mod dataset;

/// Seeded train/test split
pub mod splitter;
