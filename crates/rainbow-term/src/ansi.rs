// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write SGR sequences to any `impl Write`. The painter
// decides when to emit; this module only knows the byte-level encoding.
use std::io::{self, Write};

use crate::color::CellColor;

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Set the foreground (text) color.
///
/// Uses compact SGR codes for standard colors (30-37, 90-97), the 256-color
/// extended format for palette indices 16-255, and 24-bit `TrueColor` for RGB.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) if idx < 8 => write!(w, "\x1b[{}m", 30 + u16::from(idx)),
        CellColor::Ansi256(idx) if idx < 16 => write!(w, "\x1b[{}m", 82 + u16::from(idx)),
        CellColor::Ansi256(idx) => write!(w, "\x1b[38;5;{idx}m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Remove every CSI sequence (`ESC [ ... final-byte`) from `s`.
///
/// Painted output with its escapes stripped is the original text again.
#[must_use]
pub fn strip(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Parameter and intermediate bytes, then one final byte in @..=~.
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    // ── Foreground Color ────────────────────────────────────────────────

    #[test]
    fn fg_default() {
        assert_eq!(emit(|w| fg(w, CellColor::Default)), "\x1b[39m");
    }

    #[test]
    fn fg_ansi_standard_red() {
        assert_eq!(emit(|w| fg(w, CellColor::Ansi256(1))), "\x1b[31m");
    }

    #[test]
    fn fg_ansi_bright_black() {
        assert_eq!(emit(|w| fg(w, CellColor::Ansi256(8))), "\x1b[90m");
    }

    #[test]
    fn fg_ansi_bright_white() {
        assert_eq!(emit(|w| fg(w, CellColor::Ansi256(15))), "\x1b[97m");
    }

    #[test]
    fn fg_ansi_extended() {
        assert_eq!(emit(|w| fg(w, CellColor::Ansi256(203))), "\x1b[38;5;203m");
    }

    #[test]
    fn fg_rgb() {
        assert_eq!(
            emit(|w| fg(w, CellColor::Rgb(255, 85, 85))),
            "\x1b[38;2;255;85;85m"
        );
    }

    // ── Strip ───────────────────────────────────────────────────────────

    #[test]
    fn strip_removes_sgr() {
        assert_eq!(strip("\x1b[38;2;1;2;3m(\x1b[0m)"), "()");
    }

    #[test]
    fn strip_keeps_plain_text() {
        assert_eq!(strip("fn main() {}\n"), "fn main() {}\n");
    }

    #[test]
    fn strip_lone_escape_is_kept() {
        assert_eq!(strip("a\x1bb"), "a\x1bb");
    }
}
