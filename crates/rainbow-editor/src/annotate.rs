//! Per-token bracket annotation.
//!
//! An annotator walks a document, decides which tokens are brackets worth
//! coloring, and pairs each with its nesting depth. Color lookup and
//! painting happen downstream; a [`BracketSpan`] only carries the byte range
//! and the depth.
//!
//! Two strategies implement [`Annotator`]:
//!
//! - [`PlainAnnotator`] trusts the scanner's own string/comment heuristic,
//!   for any language.
//! - [`SyntaxAnnotator`](crate::syntax::SyntaxAnnotator) filters tokens with
//!   a tree-sitter parse first, for languages with a grammar.

use std::ops::Range;

use crate::index::DepthIndex;
use crate::scanner::ScanOptions;

/// A bracket token to color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSpan {
    /// Byte range of the token: one character, or two for `<<` / `>>`.
    pub range: Range<usize>,
    /// The bracket character the depth was looked up for.
    pub representative: char,
    pub depth: usize,
}

impl BracketSpan {
    #[must_use]
    pub const fn new(range: Range<usize>, representative: char, depth: usize) -> Self {
        Self {
            range,
            representative,
            depth,
        }
    }
}

/// Turns a document into bracket spans, sorted by offset.
pub trait Annotator {
    fn annotate(&self, text: &str, options: &ScanOptions) -> Vec<BracketSpan>;
}

/// Annotator with no syntax knowledge.
///
/// Every bracket the scanner processes becomes a span. A closer with no
/// opener still gets a span at depth `0`. Two adjacent `<` (or `>`) are
/// merged into one `<<` (`>>`) span that takes the depth of its first
/// character.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAnnotator;

impl Annotator for PlainAnnotator {
    fn annotate(&self, text: &str, options: &ScanOptions) -> Vec<BracketSpan> {
        annotate_plain(text, options)
    }
}

/// See [`PlainAnnotator`].
#[must_use]
pub fn annotate_plain(text: &str, options: &ScanOptions) -> Vec<BracketSpan> {
    let index = DepthIndex::build(text, options);
    let mut spans: Vec<BracketSpan> = Vec::with_capacity(index.len());
    let mut brackets = index.iter().peekable();

    while let Some(bracket) = brackets.next() {
        let depth = bracket.depth.unwrap_or(0);
        let mut end = bracket.offset + bracket.bracket.len_utf8();

        let doubled = matches!(bracket.bracket, '<' | '>')
            && brackets
                .peek()
                .is_some_and(|next| next.bracket == bracket.bracket && next.offset == end);
        if doubled {
            brackets.next();
            end += 1;
        }

        spans.push(BracketSpan::new(bracket.offset..end, bracket.bracket, depth));
    }

    log::debug!("plain annotation: {} spans", spans.len());
    spans
}
