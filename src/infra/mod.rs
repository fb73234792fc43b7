// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the output side of the filesystem:
//
//   table_store.rs — Dataset-dict directory
//                    One Parquet file per split plus small JSON
//                    metadata files, and the build config used.
//                    Can load the directory back into memory.
//
//   jsonl_store.rs — JSON Lines files
//                    One {"text": ...} object per line, one file
//                    per split. Can read the files back.
//
// Both stores implement the DatasetExporter trait, so the
// application layer runs them the same way and neither store
// knows the other exists.

/// Parquet-backed dataset directory
pub mod table_store;

/// Newline-delimited JSON export
pub mod jsonl_store;
