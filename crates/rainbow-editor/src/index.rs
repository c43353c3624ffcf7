//! One-pass depth cache.
//!
//! [`depth_of`](crate::scanner::depth_of) replays the document from the
//! start for every query, which costs O(document × brackets) when a whole
//! viewport is colored. [`DepthIndex`] runs the same scan once and records
//! every bracket it processes. Because the scan state at an offset only
//! depends on the text before it, [`DepthIndex::depth_of`] answers exactly
//! what a fresh `depth_of` call would.

use crate::scanner::{BracketScan, ScanOptions, ScannedBracket};

/// Depths of every bracket in a document, sorted by offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthIndex {
    brackets: Vec<ScannedBracket>,
}

impl DepthIndex {
    /// Scan `text` once and record every bracket outside strings and
    /// comments.
    #[must_use]
    pub fn build(text: &str, options: &ScanOptions) -> Self {
        let brackets: Vec<ScannedBracket> = BracketScan::new(text, *options).collect();
        log::debug!(
            "indexed {} brackets in {} bytes (angle brackets: {})",
            brackets.len(),
            text.len(),
            options.angle_brackets
        );
        Self { brackets }
    }

    /// The recorded bracket at `offset`, if the scan processed one there.
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<&ScannedBracket> {
        self.brackets
            .binary_search_by_key(&offset, |b| b.offset)
            .ok()
            .and_then(|idx| self.brackets.get(idx))
    }

    /// Depth of the processed bracket at `offset`.
    ///
    /// `None` when no bracket was processed there, or when it is a closer
    /// with no matching opener.
    #[must_use]
    pub fn depth_at(&self, offset: usize) -> Option<usize> {
        self.get(offset).and_then(|b| b.depth)
    }

    /// Same answer as [`crate::scanner::depth_of`] on the indexed text.
    #[must_use]
    pub fn depth_of(&self, offset: usize) -> usize {
        self.depth_at(offset).unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScannedBracket> {
        self.brackets.iter()
    }
}
