// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each.
//
// Rules for this layer:
//   - No chunking or split logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - No file formats here (that's Layer 6)
//   - Only workflow coordination

// Markdown folder → exported train/test datasets
pub mod build_use_case;

// Reload and cross-check a built dataset
pub mod inspect_use_case;
