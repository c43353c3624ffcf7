//! Bracket classification.
//!
//! Eight characters count as brackets: `(` `[` `{` `<` open, `)` `]` `}`
//! `>` close, and each opener has exactly one closer. Angle brackets are
//! included even though most languages also use them as comparison and
//! shift operators; [`ScanOptions`](crate::scanner::ScanOptions) can turn
//! them off.

/// Whether `c` opens a bracket pair.
#[inline]
#[must_use]
pub const fn is_opening(c: char) -> bool {
    matches!(c, '(' | '[' | '{' | '<')
}

/// Whether `c` closes a bracket pair.
#[inline]
#[must_use]
pub const fn is_closing(c: char) -> bool {
    matches!(c, ')' | ']' | '}' | '>')
}

/// Whether `c` is `<` or `>`.
#[inline]
#[must_use]
pub const fn is_angle(c: char) -> bool {
    matches!(c, '<' | '>')
}

/// The other half of a bracket pair, or `None` if `c` isn't a bracket.
#[must_use]
pub const fn matching_bracket(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        ')' => Some('('),
        '[' => Some(']'),
        ']' => Some('['),
        '{' => Some('}'),
        '}' => Some('{'),
        '<' => Some('>'),
        '>' => Some('<'),
        _ => None,
    }
}

/// Whether `open` followed later by `close` forms a pair.
#[must_use]
pub fn is_pair(open: char, close: char) -> bool {
    is_opening(open) && matching_bracket(open) == Some(close)
}

/// The bracket character a token stands for when looking up its depth.
///
/// Single bracket characters stand for themselves. The shift operators
/// `<<` and `>>` are colored as one token using the depth of their first
/// character, so they map to `<` and `>`.
#[must_use]
pub fn representative(token: &str) -> Option<char> {
    match token {
        "<<" => Some('<'),
        ">>" => Some('>'),
        _ => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if is_opening(c) || is_closing(c) => Some(c),
                _ => None,
            }
        }
    }
}
