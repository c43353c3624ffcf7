// SPDX-License-Identifier: MIT
//
// Span painter.
//
// Streams a document to a writer, wrapping each painted byte range in a
// foreground SGR sequence and a reset. Unpainted text is copied verbatim,
// so stripping the escapes from the output gives back the input.

use std::io::{self, Write};
use std::ops::Range;

use crate::ansi;
use crate::color::CellColor;

/// A byte range of a document and the foreground color to draw it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Painted {
    pub range: Range<usize>,
    pub color: CellColor,
}

impl Painted {
    #[must_use]
    pub const fn new(range: Range<usize>, color: CellColor) -> Self {
        Self { range, color }
    }
}

/// Write `text` with every span in `spans` colored.
///
/// `spans` must be sorted by start offset. A span that is empty, overlaps
/// the previous span, runs past the end of `text`, or doesn't sit on
/// `char` boundaries is skipped. `CellColor::Default` spans are written
/// without escapes.
///
/// # Errors
///
/// Propagates any error from the underlying writer.
pub fn write_painted(w: &mut impl Write, text: &str, spans: &[Painted]) -> io::Result<()> {
    let mut cursor = 0;

    for span in spans {
        let (start, end) = (span.range.start, span.range.end);
        let (Some(before), Some(body)) = (text.get(cursor..start), text.get(start..end)) else {
            continue;
        };
        if body.is_empty() {
            continue;
        }

        w.write_all(before.as_bytes())?;
        if span.color.is_default() {
            w.write_all(body.as_bytes())?;
        } else {
            ansi::fg(w, span.color)?;
            w.write_all(body.as_bytes())?;
            ansi::reset(w)?;
        }
        cursor = end;
    }

    w.write_all(text.get(cursor..).unwrap_or_default().as_bytes())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
