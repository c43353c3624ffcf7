//! Syntax-tree precheck via tree-sitter.
//!
//! The depth scanner only has a character-level idea of what a string or a
//! comment is. When the document's language has a grammar, a real parse
//! decides which bracket tokens to color instead:
//!
//! 1. Parse the document and walk every leaf token.
//! 2. Keep tokens whose text is a single bracket character or `<<` / `>>`
//!    (see [`representative`]).
//! 3. Drop tokens where the token or any ancestor node is a string, literal
//!    or comment node (the node kind contains `string`, `literal` or
//!    `comment`).
//! 4. Look up the depth of the token's first byte in a [`DepthIndex`].
//!
//! Depths still come from the character scan, so a token the parser keeps
//! but the scanner considers quoted (after a Rust lifetime, say) gets the
//! scanner's default depth `0`.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::annotate::{Annotator, BracketSpan, annotate_plain};
use crate::bracket::{is_angle, representative};
use crate::index::DepthIndex;
use crate::scanner::ScanOptions;

// ---------------------------------------------------------------------------
// Language detection
// ---------------------------------------------------------------------------

/// Languages with a bundled grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
}

impl Language {
    /// Detect the language from a file extension.
    ///
    /// Returns `None` for anything without a bundled grammar; those files go
    /// through [`PlainAnnotator`](crate::annotate::PlainAnnotator).
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "rs" => Some(Self::Rust),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rust => "rust",
        }
    }

    fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SyntaxTree
// ---------------------------------------------------------------------------

/// A parsed document.
pub struct SyntaxTree<'a> {
    source: &'a str,
    tree: Tree,
}

impl<'a> SyntaxTree<'a> {
    /// Parse `source`. Returns `None` if the grammar can't be loaded or the
    /// parser gives up.
    #[must_use]
    pub fn parse(language: Language, source: &'a str) -> Option<Self> {
        let mut parser = Parser::new();
        parser.set_language(&language.grammar()).ok()?;
        let tree = parser.parse(source, None)?;
        Some(Self { source, tree })
    }

    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Every leaf token whose text stands for a bracket, with its
    /// representative character, in document order.
    fn bracket_tokens(&self) -> Vec<(Node<'_>, char)> {
        let mut tokens = Vec::new();
        let mut cursor = self.tree.walk();

        'walk: loop {
            let node = cursor.node();
            if node.child_count() == 0 {
                let bracket = node
                    .utf8_text(self.source.as_bytes())
                    .ok()
                    .and_then(representative);
                if let Some(bracket) = bracket {
                    tokens.push((node, bracket));
                }
            }

            if cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        tokens
    }
}

/// Whether a node kind holds literal text rather than code.
fn is_literal_kind(kind: &str) -> bool {
    let kind = kind.to_ascii_lowercase();
    kind.contains("string") || kind.contains("literal") || kind.contains("comment")
}

/// Whether `node` or any of its ancestors is a string, literal or comment.
fn inside_literal(node: Node<'_>) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if is_literal_kind(n.kind()) {
            return true;
        }
        current = n.parent();
    }
    false
}

// ---------------------------------------------------------------------------
// Annotation
// ---------------------------------------------------------------------------

/// Bracket spans for a parsed document. See the module docs for the rules.
#[must_use]
pub fn annotate_syntax(tree: &SyntaxTree<'_>, options: &ScanOptions) -> Vec<BracketSpan> {
    let index = DepthIndex::build(tree.source, options);

    let spans: Vec<BracketSpan> = tree
        .bracket_tokens()
        .into_iter()
        .filter(|&(node, bracket)| {
            if !options.angle_brackets && is_angle(bracket) {
                return false;
            }
            if inside_literal(node) {
                log::trace!("skipping `{bracket}` at {} inside {}", node.start_byte(), node.kind());
                return false;
            }
            true
        })
        .map(|(node, bracket)| {
            let start = node.start_byte();
            BracketSpan::new(start..node.end_byte(), bracket, index.depth_of(start))
        })
        .collect();

    log::debug!("syntax annotation: {} spans", spans.len());
    spans
}

/// [`Annotator`] backed by a tree-sitter grammar.
///
/// Falls back to the plain scanner when the parse fails.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxAnnotator {
    language: Language,
}

impl SyntaxAnnotator {
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }
}

impl Annotator for SyntaxAnnotator {
    fn annotate(&self, text: &str, options: &ScanOptions) -> Vec<BracketSpan> {
        if let Some(tree) = SyntaxTree::parse(self.language, text) {
            annotate_syntax(&tree, options)
        } else {
            log::warn!("{} parse failed, falling back to plain scan", self.language.name());
            annotate_plain(text, options)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
