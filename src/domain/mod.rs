// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits that define the core
// concepts of the dataset builder.
//
// Rules for this layer:
//   - NO file I/O
//   - NO serialisation formats beyond serde derives
//   - Only plain Rust structs, enums, and traits
//
// Types here describe what flows through the pipeline;
// the data and infra layers decide how it is produced and stored.

// A loaded Markdown document
pub mod document;

// One training example and the train/test split that holds them
pub mod example;

// Error kinds every other layer reports through
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
