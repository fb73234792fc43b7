// ============================================================
// Layer 3 — Example and DatasetSplit Domain Types
// ============================================================
// An Example is the unit of training data: one chunk of text
// wrapped in a record with a single `text` field.
//
// Serialised with serde this becomes exactly:
//   {"text": "..."}
// which is the line format of the JSON exports.
//
// A DatasetSplit holds the two disjoint subsets produced by
// the splitter. Both exporters read from the same value.

use serde::{Deserialize, Serialize};

/// One training example.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Example {
    pub text: String,
}

impl Example {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// First `max_chars` characters followed by an ellipsis.
    /// Used for the console preview.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut out: String = self.text.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}

/// Names of the two subsets, in the order they are persisted.
pub const SPLIT_NAMES: [&str; 2] = ["train", "test"];

/// The train/test partition of all examples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSplit {
    pub train: Vec<Example>,
    pub test:  Vec<Example>,
}

impl DatasetSplit {
    pub fn new(train: Vec<Example>, test: Vec<Example>) -> Self {
        Self { train, test }
    }

    /// Total number of examples across both subsets
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    /// Iterate over (name, examples) pairs in persisted order
    pub fn subsets(&self) -> impl Iterator<Item = (&'static str, &[Example])> {
        [("train", self.train.as_slice()), ("test", self.test.as_slice())].into_iter()
    }
}
