//! # rainbow-editor — bracket depth core
//!
//! - **[`bracket`]**: pure classification of the eight bracket characters
//! - **[`scanner`]**: the depth scanner, a quote/escape/comment state
//!   machine layered over a stack of open brackets
//! - **[`index`]**: one-pass depth cache with the same contract as
//!   [`scanner::depth_of`]
//! - **[`annotate`]**: per-token driver that turns a document into
//!   [`annotate::BracketSpan`]s
//! - **[`syntax`]**: tree-sitter precheck that keeps brackets inside
//!   string and comment nodes out of the annotation
//!
//! All offsets are byte offsets into a `&str`.

pub mod annotate;
pub mod bracket;
pub mod index;
pub mod scanner;
pub mod syntax;

pub use annotate::{Annotator, BracketSpan, PlainAnnotator, annotate_plain};
pub use index::DepthIndex;
pub use scanner::{ScanOptions, depth_of, depth_of_with};
pub use syntax::{Language, SyntaxAnnotator, SyntaxTree, annotate_syntax};
