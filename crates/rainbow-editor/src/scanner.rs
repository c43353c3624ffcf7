//! Bracket depth scanning.
//!
//! The depth of a bracket is the number of unmatched openers enclosing it,
//! counted on a left-to-right pass from the start of the document. Brackets
//! inside string literals and comments don't count, so the pass runs a small
//! lexical state machine alongside the bracket stack:
//!
//! - `//` starts a line comment that ends at the next line feed
//! - `/*` starts a block comment that ends at the next `*/`
//! - `"`, `'` or `` ` `` starts a string that ends at the same quote
//!   character; a quote right after a backslash never toggles anything
//!
//! This is a heuristic, not a tokenizer. It has no notion of raw or
//! triple-quoted strings, nested block comments, regex literals, or Rust
//! lifetimes (`'a` opens a "string"). When a syntax tree is available,
//! [`crate::syntax`] does the string/comment filtering properly and this
//! scanner only supplies depths.
//!
//! Unbalanced input is tolerated. A closer takes the nearest matching opener
//! off the stack wherever it sits, leaving unmatched openers in place; a
//! closer with no matching opener is ignored.
//!
//! [`depth_of`] rescans from offset 0 on every call. For many queries on the
//! same text, build a [`DepthIndex`](crate::index::DepthIndex) once instead.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::bracket::{is_angle, is_closing, is_opening, matching_bracket};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Knobs for the scan. The default treats `<` and `>` as brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Treat `<` and `>` as brackets. Turn off for languages where they are
    /// mostly comparison or shift operators.
    pub angle_brackets: bool,
}

impl ScanOptions {
    /// Options with angle brackets disabled.
    #[must_use]
    pub const fn without_angles() -> Self {
        Self {
            angle_brackets: false,
        }
    }

    /// Whether `c` takes part in bracket matching under these options.
    #[inline]
    #[must_use]
    pub const fn is_bracket(&self, c: char) -> bool {
        (is_opening(c) || is_closing(c)) && (self.angle_brackets || !is_angle(c))
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            angle_brackets: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Nesting depth of the bracket at byte offset `target`.
///
/// Returns `0` when `target` is past the end of `text`, isn't the start of
/// a bracket character, sits inside a string or comment, or is a closer with
/// no matching opener.
///
/// ```
/// use rainbow_editor::scanner::depth_of;
///
/// let text = "(a(b)c)";
/// assert_eq!(depth_of(text, 0), 0);
/// assert_eq!(depth_of(text, 2), 1);
/// assert_eq!(depth_of(text, 4), 1);
/// assert_eq!(depth_of(text, 6), 0);
/// ```
#[must_use]
pub fn depth_of(text: &str, target: usize) -> usize {
    depth_of_with(text, target, &ScanOptions::default())
}

/// [`depth_of`] with explicit [`ScanOptions`].
#[must_use]
pub fn depth_of_with(text: &str, target: usize, options: &ScanOptions) -> usize {
    BracketScan::until(text, target, *options)
        .find(|bracket| bracket.offset == target)
        .and_then(|bracket| bracket.depth)
        .unwrap_or(0)
}

/// A bracket the scanner reached outside strings and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedBracket {
    /// Byte offset of the bracket character.
    pub offset: usize,
    pub bracket: char,
    /// Stack size before the push for an opener; the matching opener's depth
    /// for a closer; `None` for a closer with nothing to match.
    pub depth: Option<usize>,
}

/// Iterator over every bracket processed by the scan, in document order.
///
/// The string/comment state and the open stack are local to the iterator;
/// nothing is shared between scans.
pub struct BracketScan<'a> {
    chars: Peekable<CharIndices<'a>>,
    prev: Option<char>,
    /// Last byte offset to look at (inclusive).
    last: Option<usize>,
    options: ScanOptions,
    state: ScanState,
}

impl<'a> BracketScan<'a> {
    /// Scan the whole of `text`.
    #[must_use]
    pub fn new(text: &'a str, options: ScanOptions) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            prev: None,
            last: None,
            options,
            state: ScanState::default(),
        }
    }

    /// Scan characters whose offset is at most `last`.
    #[must_use]
    pub fn until(text: &'a str, last: usize, options: ScanOptions) -> Self {
        Self {
            last: Some(last),
            ..Self::new(text, options)
        }
    }
}

impl Iterator for BracketScan<'_> {
    type Item = ScannedBracket;

    fn next(&mut self) -> Option<ScannedBracket> {
        while let Some((offset, c)) = self.chars.next() {
            if self.last.is_some_and(|last| offset > last) {
                return None;
            }
            let next = self.chars.peek().map_or(' ', |&(_, next)| next);
            let prev = self.prev.replace(c);

            if !self.state.advance(c, next, prev) || !self.options.is_bracket(c) {
                continue;
            }
            return Some(self.state.match_bracket(offset, c));
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Scan state
// ---------------------------------------------------------------------------

/// Lexical state plus the stack of open brackets.
#[derive(Debug, Default)]
struct ScanState {
    in_string: bool,
    string_delimiter: Option<char>,
    in_line_comment: bool,
    in_block_comment: bool,
    /// `(opener, depth at push)`, innermost last.
    open_stack: Vec<(char, usize)>,
}

impl ScanState {
    /// Feed one character. Returns whether `c` sits outside strings and
    /// comments, i.e. whether it may be treated as a bracket.
    ///
    /// `next` is the following character (a space at end of text) and
    /// `prev` the preceding one.
    fn advance(&mut self, c: char, next: char, prev: Option<char>) -> bool {
        if !self.in_string {
            if self.in_line_comment {
                if c != '\n' {
                    return false;
                }
                self.in_line_comment = false;
            } else if c == '/' && next == '/' {
                self.in_line_comment = true;
            } else if c == '/' && next == '*' {
                self.in_block_comment = true;
            } else if c == '*' && next == '/' && self.in_block_comment {
                self.in_block_comment = false;
            } else if self.in_block_comment {
                return false;
            }
        }

        if is_quote(c) && prev != Some('\\') {
            if !self.in_string {
                self.in_string = true;
                self.string_delimiter = Some(c);
            } else if self.string_delimiter == Some(c) {
                self.in_string = false;
                self.string_delimiter = None;
            }
        }

        !(self.in_string || self.in_line_comment || self.in_block_comment)
    }

    /// Push an opener or resolve a closer against the stack.
    fn match_bracket(&mut self, offset: usize, bracket: char) -> ScannedBracket {
        let depth = if is_opening(bracket) {
            let depth = self.open_stack.len();
            self.open_stack.push((bracket, depth));
            Some(depth)
        } else {
            let opener = matching_bracket(bracket);
            self.open_stack
                .iter()
                .rposition(|&(open, _)| Some(open) == opener)
                .map(|idx| self.open_stack.remove(idx).1)
        };
        ScannedBracket {
            offset,
            bracket,
            depth,
        }
    }
}

const fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn brackets(text: &str) -> Vec<(usize, char, Option<usize>)> {
        BracketScan::new(text, ScanOptions::default())
            .map(|b| (b.offset, b.bracket, b.depth))
            .collect()
    }

    // ── Nesting ─────────────────────────────────────────────────────────

    #[rstest]
    #[case("(a(b)c)", 0, 0)]
    #[case("(a(b)c)", 2, 1)]
    #[case("(a(b)c)", 4, 1)]
    #[case("(a(b)c)", 6, 0)]
    #[case("{[<(x)>]}", 3, 3)]
    #[case("{[<(x)>]}", 5, 3)]
    #[case("{[<(x)>]}", 8, 0)]
    #[case("f(a)(b)", 4, 0)]
    fn nesting(#[case] text: &str, #[case] offset: usize, #[case] expected: usize) {
        assert_eq!(depth_of(text, offset), expected);
    }

    #[test]
    fn deep_nesting() {
        let text = "((((((((x))))))))";
        for i in 0..8 {
            assert_eq!(depth_of(text, i), i, "opener at {i}");
            assert_eq!(depth_of(text, 16 - i), i, "closer at {}", 16 - i);
        }
    }

    // ── Unbalanced input ────────────────────────────────────────────────

    #[rstest]
    #[case(")(a)", 0, 0)]
    #[case(")(a)", 1, 0)]
    #[case(")(a)", 3, 0)]
    #[case("(()", 1, 1)]
    #[case("(()", 2, 1)]
    fn unmatched(#[case] text: &str, #[case] offset: usize, #[case] expected: usize) {
        assert_eq!(depth_of(text, offset), expected);
    }

    #[test]
    fn unmatched_closer_reports_no_depth() {
        assert_eq!(brackets(")(a)"), vec![(0, ')', None), (1, '(', Some(0)), (3, ')', Some(0))]);
    }

    #[test]
    fn interleaved_pairs_match_nearest_opener() {
        // `)` takes the `(` out from under the `[`.
        assert_eq!(depth_of("([)]", 2), 0);
        assert_eq!(depth_of("([)]", 3), 1);
    }

    #[test]
    fn mismatched_closer_leaves_stack_alone() {
        // `]` has no `[` to match; the `(` stays open for the final `)`.
        assert_eq!(brackets("(]x)"), vec![(0, '(', Some(0)), (1, ']', None), (3, ')', Some(0))]);
    }

    // ── Strings ─────────────────────────────────────────────────────────

    #[test]
    fn bracket_inside_string_is_ignored() {
        let text = "(\"(\")";
        assert_eq!(depth_of(text, 2), 0);
        assert_eq!(depth_of(text, 4), 0);
        assert_eq!(brackets(text), vec![(0, '(', Some(0)), (4, ')', Some(0))]);
    }

    #[test]
    fn string_does_not_disturb_nesting() {
        let text = "[\"(\"(x)]";
        assert_eq!(depth_of(text, 4), 1);
        assert_eq!(depth_of(text, 6), 1);
        assert_eq!(depth_of(text, 7), 0);
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let text = r#"("a\"(" (x))"#;
        assert_eq!(depth_of(text, 5), 0);
        assert_eq!(depth_of(text, 8), 1);
        assert_eq!(depth_of(text, 10), 1);
        assert_eq!(depth_of(text, 11), 0);
    }

    #[test]
    fn escaped_backslash_before_quote_still_counts_as_escape() {
        // Only the single preceding character is checked, so `"\\"` never
        // closes and everything after it stays inside the string.
        assert!(brackets(r#""\\" (x)"#).is_empty());
    }

    #[test]
    fn other_quote_kinds_inside_string_are_literal() {
        let text = r#"("it's" [x])"#;
        assert_eq!(depth_of(text, 8), 1);
        assert_eq!(depth_of(text, 10), 1);
        assert_eq!(depth_of(text, 11), 0);
    }

    #[test]
    fn backtick_strings() {
        let text = "`(` (x)";
        assert_eq!(brackets(text), vec![(4, '(', Some(0)), (6, ')', Some(0))]);
    }

    #[test]
    fn comment_markers_inside_string_are_literal() {
        assert_eq!(brackets(r#""//" (x)"#), vec![(5, '(', Some(0)), (7, ')', Some(0))]);
    }

    #[test]
    fn unterminated_string_swallows_the_rest() {
        let text = "(\"(x)";
        assert_eq!(depth_of(text, 4), 0);
        assert_eq!(brackets(text), vec![(0, '(', Some(0))]);
    }

    // ── Comments ────────────────────────────────────────────────────────

    #[test]
    fn line_comment_hides_opener() {
        let text = "// (\n)";
        assert_eq!(depth_of(text, 3), 0);
        assert_eq!(depth_of(text, 5), 0);
        assert_eq!(brackets(text), vec![(5, ')', None)]);
    }

    #[test]
    fn line_comment_ends_at_newline() {
        let text = "((\n// )\n)";
        assert_eq!(depth_of(text, 6), 0);
        assert_eq!(depth_of(text, 8), 1);
    }

    #[test]
    fn quote_inside_line_comment_is_literal() {
        assert_eq!(brackets("// it's\n(x)"), vec![(8, '(', Some(0)), (10, ')', Some(0))]);
    }

    #[test]
    fn block_comment_hides_brackets() {
        let text = "(/* ) */ [x])";
        assert_eq!(depth_of(text, 4), 0);
        assert_eq!(depth_of(text, 9), 1);
        assert_eq!(depth_of(text, 11), 1);
        assert_eq!(depth_of(text, 12), 0);
    }

    #[test]
    fn block_comment_spans_lines() {
        let text = "{\n/*\n}\n*/\n}";
        assert_eq!(brackets(text), vec![(0, '{', Some(0)), (10, '}', Some(0))]);
    }

    #[test]
    fn block_comment_closes_on_first_star_slash() {
        // `/*/` opens and immediately closes: the `*` sees the `/` after it.
        assert_eq!(brackets("/*/("), vec![(3, '(', Some(0))]);
    }

    // ── Offsets ─────────────────────────────────────────────────────────

    #[rstest]
    #[case("()", 10)]
    #[case("", 0)]
    #[case("(a)", 1)]
    #[case("x", 0)]
    fn non_bracket_offsets_default_to_zero(#[case] text: &str, #[case] offset: usize) {
        assert_eq!(depth_of(text, offset), 0);
    }

    #[test]
    fn offsets_are_bytes() {
        let text = "(é(";
        assert_eq!(depth_of(text, 3), 1);
        // Inside the two-byte 'é'.
        assert_eq!(depth_of(text, 2), 0);
    }

    #[test]
    fn scan_stops_at_target() {
        let scanned: Vec<usize> = BracketScan::until("(()())", 2, ScanOptions::default())
            .map(|b| b.offset)
            .collect();
        assert_eq!(scanned, vec![0, 1, 2]);
    }

    #[test]
    fn depth_of_is_idempotent() {
        let text = "fn f() { g(\"(\", [1, 2]) } // )";
        for offset in 0..text.len() {
            assert_eq!(depth_of(text, offset), depth_of(text, offset));
        }
    }

    // ── Angle brackets ──────────────────────────────────────────────────

    #[test]
    fn angles_are_brackets_by_default() {
        let text = "Vec<Option<(u8)>>";
        assert_eq!(depth_of(text, 3), 0);
        assert_eq!(depth_of(text, 10), 1);
        assert_eq!(depth_of(text, 11), 2);
        assert_eq!(depth_of(text, 16), 0);
    }

    #[test]
    fn angles_can_be_disabled() {
        let options = ScanOptions::without_angles();
        let text = "if a < b { (c) }";
        assert_eq!(depth_of(text, 11), 2);
        assert_eq!(depth_of_with(text, 11, &options), 1);
        assert_eq!(depth_of_with("a < (b)", 4, &options), 0);
        assert_eq!(depth_of("a < (b)", 4), 1);
        assert_eq!(depth_of_with("<x>", 0, &options), 0);
    }

    #[test]
    fn option_bracket_sets() {
        let with = ScanOptions::default();
        let without = ScanOptions::without_angles();
        assert!(with.is_bracket('<') && with.is_bracket('('));
        assert!(!without.is_bracket('>') && without.is_bracket('}'));
        assert!(!with.is_bracket('a'));
    }
}
