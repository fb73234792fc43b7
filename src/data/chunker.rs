// ============================================================
// Layer 4 — Text Chunker
// ============================================================
// Splits a document into overlapping fixed-width windows.
//
// Windows start at character offsets 0, stride, 2*stride, ...
// and each is `window` characters long, clamped to the end of
// the text. Iteration stops once the offset passes the end.
//
// Example with window=5, stride=3 on "ABCDEFGHIJK" (11 chars):
//   offset 0  → "ABCDE"
//   offset 3  → "DEFGH"
//   offset 6  → "GHIJK"
//   offset 9  → "JK"     (2 chars)
//
// Windows shorter than window/4 are dropped. Only windows near
// the end of a document can be that short, so a document
// shorter than window/4 produces nothing at all.
//
// Offsets and lengths count chars (Unicode scalar values), never
// bytes, so a window never splits a multi-byte character.

use crate::domain::error::PipelineError;

/// Sliding-window chunker over characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    /// Maximum characters per chunk
    window: usize,
    /// Characters the window advances between chunks
    stride: usize,
}

impl Chunker {
    /// Create a new Chunker.
    ///
    /// A zero stride would never advance, and a zero window could
    /// only ever produce empty chunks, so both are rejected.
    pub fn new(window: usize, stride: usize) -> Result<Self, PipelineError> {
        if window == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_length must be greater than zero".to_string(),
            ));
        }
        if stride == 0 {
            return Err(PipelineError::InvalidConfig(
                "stride must be greater than zero".to_string(),
            ));
        }
        Ok(Self { window, stride })
    }

    /// Shortest chunk that is kept
    pub fn min_len(&self) -> usize {
        self.window / 4
    }

    /// Lazily yield every kept window of `text`.
    /// Calling this again (or cloning the iterator) restarts from the top.
    pub fn chunks<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks {
            text,
            window:  self.window,
            stride:  self.stride,
            min_len: self.min_len(),
            start:   0,
        }
    }
}

/// Iterator returned by [`Chunker::chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    text:    &'a str,
    window:  usize,
    stride:  usize,
    min_len: usize,
    /// Byte offset of the next window start; always a char boundary
    start:   usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.start < self.text.len() {
            let rest = &self.text[self.start..];

            let (chars, end) = advance(rest, self.window);
            let (_, step) = advance(rest, self.stride);
            self.start += step;

            if chars >= self.min_len {
                return Some(&rest[..end]);
            }
        }
        None
    }
}

/// Move up to `n` chars into `s`.
/// Returns (chars actually passed, byte offset reached).
fn advance(s: &str, n: usize) -> (usize, usize) {
    match s.char_indices().nth(n) {
        Some((byte, _)) => (n, byte),
        None => (s.chars().count(), s.len()),
    }
}
